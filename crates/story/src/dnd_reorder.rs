use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::list::ListItem;
use gpui_component::{Icon, IconName, Sizable as _, h_flex, v_flex};
use gpui_dnd_reorder_list::{
    DndReorderItem, DndReorderListState, DndReorderRowState, dnd_reorder_list,
};

/// Demo payload: the number of note lines controls the row height.
#[derive(Clone)]
pub struct Note {
    lines: usize,
}

pub struct DndReorderListExample {
    list: Entity<DndReorderListState<Note>>,
}

impl DndReorderListExample {
    pub fn view(_window: &mut Window, cx: &mut App) -> Entity<Self> {
        let items = demo_items();
        let list = cx.new(|cx| {
            DndReorderListState::new(cx)
                .items(items)
                .spacing(px(6.))
                .drag_on_row()
                // The first slot is pinned unless shift is held.
                .can_drop(|proposal, _items, modifiers| proposal.to != 0 || modifiers.shift)
                .on_reorder(|commit, items| {
                    if commit.is_noop() {
                        return;
                    }
                    let order = items
                        .iter()
                        .map(|item| item.id.as_ref())
                        .collect::<Vec<_>>()
                        .join(", ");
                    tracing::info!(
                        item = %commit.item_id,
                        from = commit.from,
                        to = commit.to,
                        "reordered: {order}"
                    );
                })
        });
        cx.new(|cx| {
            cx.observe(&list, |_, _, cx| cx.notify()).detach();
            Self { list }
        })
    }
}

impl Render for DndReorderListExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let state = self.list.read(cx);
        let items = state.items_ref();
        let selected_id = state
            .selected_index()
            .and_then(|ix| items.get(ix))
            .map(|item| item.id.to_string())
            .unwrap_or_else(|| "<none>".to_string());
        let dump = order_dump(items, state.row_offsets());

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("DnD Reorder (Variable Height)"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.muted_foreground)
                            .child("Drag a row; the others slide aside. Hold shift to drop into the first slot."),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.muted_foreground)
                            .child(format!("Selected: {selected_id}")),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(
                        v_flex()
                            .w(px(520.))
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("List"),
                            )
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .p(px(8.))
                                    .child(dnd_reorder_list(
                                        &self.list,
                                        move |ix, item, row_state, _window, cx| {
                                            render_list_row(ix, item, row_state, cx)
                                        },
                                    )),
                            ),
                    )
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("Debug (order/offsets)"),
                            )
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .p(px(12.))
                                    .child(render_dump(dump)),
                            ),
                    ),
            )
    }
}

fn render_list_row(
    ix: usize,
    item: &DndReorderItem<Note>,
    row_state: DndReorderRowState,
    cx: &mut App,
) -> ListItem {
    let theme = cx.theme();
    let lines = item.data.lines;

    let header = h_flex()
        .gap_x_2()
        .items_center()
        .child(
            Icon::from(IconName::Menu)
                .small()
                .text_color(theme.muted_foreground),
        )
        .child(item.label.clone())
        .when(item.is_disabled(), |this| {
            this.child(
                div()
                    .text_xs()
                    .text_color(theme.muted_foreground)
                    .child("locked"),
            )
        });
    let notes = (0..lines).map(|line| {
        div()
            .text_xs()
            .text_color(theme.muted_foreground)
            .child(format!("note {}", line + 1))
    });

    ListItem::new(ix)
        .when(row_state.floating, |this| this.opacity(0.9))
        .child(v_flex().w_full().gap_y_0p5().child(header).children(notes))
}

fn order_dump(items: &[DndReorderItem<Note>], offsets: &[f32]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(ix, item)| {
            let top = offsets.get(ix).copied().unwrap_or(0.);
            format!("{ix:02}  {}  top={top:.0}px", item.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_dump(text: String) -> impl IntoElement {
    let lines = text
        .lines()
        .map(|line| div().text_sm().child(line.to_string()));
    v_flex().gap_y_0p5().children(lines)
}

fn demo_items() -> Vec<DndReorderItem<Note>> {
    let lines = [0, 1, 3, 2];

    (0..16)
        .map(|ix| {
            let id = format!("row/{ix:02}");
            let label = format!("Row {ix:02}");
            let note = Note {
                lines: lines[ix % lines.len()],
            };
            let mut item = DndReorderItem::new(id, label, note);
            if ix == 5 {
                item = item.disabled(true);
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{demo_items, order_dump};

    #[test]
    fn dump_lists_rows_in_current_order() {
        let mut items = demo_items();
        items.truncate(3);
        items.swap(0, 2);

        let dump = order_dump(&items, &[0., 24., 70.]);
        assert_eq!(
            dump,
            "00  row/02  top=0px\n01  row/01  top=24px\n02  row/00  top=70px"
        );
    }

    #[test]
    fn unmeasured_rows_dump_at_zero() {
        let items = demo_items();
        let dump = order_dump(&items[..2], &[]);
        assert_eq!(dump.lines().count(), 2);
        assert!(dump.lines().all(|line| line.ends_with("top=0px")));
    }
}
