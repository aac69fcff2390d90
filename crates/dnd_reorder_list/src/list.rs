use std::{rc::Rc, time::Duration};

use dnd_reorder::{
    Commit, ReorderConfig, ReorderError, ReorderItem, ReorderList, RowDirective, RowSize,
    Translation,
};
use gpui::{
    Animation, AnimationExt as _, AnyElement, App, AppContext as _, Bounds, Context, CursorStyle,
    DragMoveEvent, ElementId, Empty, Entity, EntityId, FocusHandle, InteractiveElement as _,
    IntoElement, Modifiers, MouseButton, MouseDownEvent, ParentElement as _, Pixels, Point, Render,
    RenderOnce, SharedString,
    StatefulInteractiveElement as _, StyleRefinement, Styled, Window, div, ease_in_out,
    prelude::FluentBuilder as _, px,
};
use gpui_component::list::ListItem;
use gpui_component::{ActiveTheme as _, StyledExt as _, v_flex};

const CONTEXT: &str = "DndReorderList";
const DEFAULT_SETTLE_DURATION: Duration = Duration::from_millis(180);

/// Create a [`DndReorderList`].
pub fn dnd_reorder_list<T, R>(
    state: &Entity<DndReorderListState<T>>,
    render_item: R,
) -> DndReorderList<T>
where
    T: 'static,
    R: Fn(usize, &DndReorderItem<T>, DndReorderRowState, &mut Window, &mut App) -> ListItem
        + 'static,
{
    DndReorderList::new(state, render_item)
}

/// A single item in a [`DndReorderListState`].
///
/// Row heights are measured from the rendered rows, so items carry no size.
#[derive(Clone)]
pub struct DndReorderItem<T> {
    pub id: SharedString,
    pub label: SharedString,
    pub data: T,
    disabled: bool,
}

impl<T> DndReorderItem<T> {
    pub fn new(id: impl Into<SharedString>, label: impl Into<SharedString>, data: T) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data,
            disabled: false,
        }
    }

    /// Disabled items render normally but never start a drag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl<T> ReorderItem for DndReorderItem<T> {
    type Id = SharedString;

    fn id(&self) -> SharedString {
        self.id.clone()
    }
}

#[derive(Clone)]
struct DndReorderDrag {
    list_id: EntityId,
    ix: usize,
}

/// The floating row is drawn inside the list, so the cursor-attached view stays empty.
struct DragPreview;

impl Render for DragPreview {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        Empty
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DndReorderRowState {
    pub selected: bool,
    /// The row is the placeholder left in the list while its floating copy follows the pointer.
    pub placeholder: bool,
    /// The row is the floating copy.
    pub floating: bool,
}

/// A proposed reorder, as seen by [`DndReorderListState::can_drop`].
#[derive(Clone, Debug)]
pub struct DndReorderProposal {
    pub item_id: SharedString,
    pub from: usize,
    pub to: usize,
}

struct DndReorderListStateCallbacks<T> {
    can_drop: Option<Rc<dyn Fn(&DndReorderProposal, &[DndReorderItem<T>], Modifiers) -> bool>>,
    on_reorder: Option<Rc<dyn Fn(&Commit<SharedString>, &[DndReorderItem<T>])>>,
}

impl<T> Default for DndReorderListStateCallbacks<T> {
    fn default() -> Self {
        Self {
            can_drop: None,
            on_reorder: None,
        }
    }
}

/// State for a reorderable list whose rows slide out of the way while one row is dragged.
pub struct DndReorderListState<T> {
    focus_handle: FocusHandle,
    list: ReorderList<DndReorderItem<T>>,
    drag_handle_width: Option<Pixels>,
    settle_duration: Duration,
    settle_generation: usize,
    selected_ix: Option<usize>,
    mouse_down_position: Option<Point<Pixels>>,
    drag_start_mouse_position: Option<Point<Pixels>>,
    callbacks: DndReorderListStateCallbacks<T>,
    render_item:
        Rc<dyn Fn(usize, &DndReorderItem<T>, DndReorderRowState, &mut Window, &mut App) -> ListItem>,
}

impl<T: 'static> DndReorderListState<T> {
    pub fn new(cx: &mut App) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            list: ReorderList::default(),
            drag_handle_width: Some(px(32.)),
            settle_duration: DEFAULT_SETTLE_DURATION,
            settle_generation: 0,
            selected_ix: None,
            mouse_down_position: None,
            drag_start_mouse_position: None,
            callbacks: DndReorderListStateCallbacks::default(),
            render_item: Rc::new(|_, _, _, _, _| ListItem::new("dnd-reorder-empty")),
        }
    }

    pub fn items(mut self, items: impl Into<Vec<DndReorderItem<T>>>) -> Self {
        if let Err(err) = self.list.set_items(items) {
            tracing::warn!("ignoring items: {err}");
        }
        self
    }

    /// Apply a [`ReorderConfig`], e.g. one deserialized from settings.
    pub fn config(mut self, config: ReorderConfig) -> Self {
        if let Err(err) = self.list.set_config(config) {
            tracing::warn!("ignoring reorder config: {err}");
        }
        self
    }

    /// Gap between consecutive rows.
    pub fn spacing(self, spacing: Pixels) -> Self {
        self.config(ReorderConfig::default().with_spacing(spacing.into()))
    }

    /// Restrict drag start to a left-side handle area with the given width.
    pub fn drag_handle_width(mut self, width: Pixels) -> Self {
        self.drag_handle_width = Some(width);
        self
    }

    /// Allow dragging from anywhere on the row.
    pub fn drag_on_row(mut self) -> Self {
        self.drag_handle_width = None;
        self
    }

    /// How long a dropped row takes to slide into its new slot.
    pub fn settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    /// Replace the items. Fails while a row is being dragged.
    pub fn set_items(
        &mut self,
        items: impl Into<Vec<DndReorderItem<T>>>,
        cx: &mut Context<Self>,
    ) -> Result<(), ReorderError> {
        self.list.set_items(items)?;
        self.selected_ix = None;
        self.drag_start_mouse_position = None;
        cx.notify();
        Ok(())
    }

    pub fn items_ref(&self) -> &[DndReorderItem<T>] {
        self.list.items()
    }

    /// Measured top offset of every row, in list order.
    pub fn row_offsets(&self) -> &[f32] {
        self.list.top_offsets()
    }

    pub fn is_dragging(&self) -> bool {
        self.list.is_dragging()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_ix
    }

    pub fn set_selected_index(&mut self, ix: Option<usize>, cx: &mut Context<Self>) {
        self.selected_ix = ix;
        cx.notify();
    }

    /// Provide a predicate to control whether a reorder is allowed.
    ///
    /// A rejected drop settles the row back into its original slot.
    pub fn can_drop(
        mut self,
        can_drop: impl Fn(&DndReorderProposal, &[DndReorderItem<T>], Modifiers) -> bool + 'static,
    ) -> Self {
        self.callbacks.can_drop = Some(Rc::new(can_drop));
        self
    }

    /// Provide a callback invoked once per accepted drop, with the committed order.
    pub fn on_reorder(
        mut self,
        on_reorder: impl Fn(&Commit<SharedString>, &[DndReorderItem<T>]) + 'static,
    ) -> Self {
        self.callbacks.on_reorder = Some(Rc::new(on_reorder));
        self
    }

    fn on_rows_prepainted(&mut self, bounds: Vec<Bounds<Pixels>>, cx: &mut Context<Self>) {
        let sizes = bounds
            .iter()
            .enumerate()
            .map(|(ix, bounds)| (ix, row_size(bounds)));
        if self.list.report_sizes(sizes) {
            cx.notify();
        }
    }

    fn on_entry_click(
        &mut self,
        ix: usize,
        _event: &gpui::ClickEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.selected_ix = Some(ix);
        cx.notify();
    }

    fn on_drag_start(
        &mut self,
        drag: &DndReorderDrag,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        // gpui starts the drag past its movement threshold; measure from the press instead.
        self.drag_start_mouse_position = Some(drag_origin(
            self.mouse_down_position.take(),
            window.mouse_position(),
        ));
        if self
            .list
            .drag_changed(drag.ix, Translation::default())
            .is_some()
        {
            self.selected_ix = Some(drag.ix);
        }
        cx.notify();
    }

    fn on_drag_move(
        &mut self,
        event: &DragMoveEvent<DndReorderDrag>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !cx.has_active_drag() {
            return;
        }

        let (list_id, ix) = {
            let drag = event.drag(cx);
            (drag.list_id, drag.ix)
        };
        if list_id != cx.entity_id() {
            return;
        }

        let Some(start) = self.drag_start_mouse_position else {
            return;
        };
        let translation = translation_between(start, event.event.position);
        if self.list.drag_changed(ix, translation).is_some() {
            cx.notify();
        }
    }

    fn drop_is_allowed(&mut self, proposal: &DndReorderProposal, modifiers: Modifiers) -> bool {
        self.callbacks
            .can_drop
            .as_ref()
            .map(|f| f(proposal, self.list.items(), modifiers))
            .unwrap_or(true)
    }

    fn on_drop(&mut self, drag: &DndReorderDrag, window: &mut Window, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        self.drag_start_mouse_position = None;

        let Some(proposal) = drop_proposal(&self.list) else {
            return;
        };
        let allowed =
            proposal.from == proposal.to || self.drop_is_allowed(&proposal, window.modifiers());

        let (commit, notify_reorder) = settle_drop(&mut self.list, drag.ix, allowed);
        let Some(commit) = commit else {
            return;
        };

        self.selected_ix = Some(commit.to);
        self.schedule_settle(cx);
        cx.notify();

        if !notify_reorder {
            return;
        }
        if let Some(on_reorder) = self.callbacks.on_reorder.as_ref() {
            on_reorder(&commit, self.list.items());
        }
    }

    /// The drag ended somewhere that did not accept the drop.
    fn on_drag_lost(&mut self, cx: &mut Context<Self>) {
        self.drag_start_mouse_position = None;
        if cancel_lost_drag(&mut self.list) {
            self.schedule_settle(cx);
        }
    }

    fn schedule_settle(&mut self, cx: &mut Context<Self>) {
        self.settle_generation = self.settle_generation.wrapping_add(1);
        let generation = self.settle_generation;
        let duration = self.settle_duration;

        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(duration).await;
            this.update(cx, |state, cx| {
                if state.settle_generation == generation && state.list.finish_settle() {
                    cx.notify();
                }
            })
            .ok();
        })
        .detach();
    }

    fn render_drag_source(
        &self,
        row: gpui::Stateful<gpui::Div>,
        ix: usize,
        state_entity: &Entity<Self>,
        list_id: EntityId,
    ) -> gpui::Stateful<gpui::Div> {
        let drag_value = DndReorderDrag { list_id, ix };
        let down_entity = state_entity.clone();
        let record_press = move |event: &MouseDownEvent, _window: &mut Window, cx: &mut App| {
            down_entity.update(cx, |state, _| {
                state.mouse_down_position = Some(event.position);
            });
        };
        let state_entity = state_entity.clone();
        let start_drag = move |drag: &DndReorderDrag,
                               _cursor_offset: Point<Pixels>,
                               window: &mut Window,
                               cx: &mut App| {
            state_entity.update(cx, |state, cx| {
                state.on_drag_start(drag, window, cx);
            });
            cx.new(|_| DragPreview)
        };

        match self.drag_handle_width {
            Some(handle_width) => row.child(
                div()
                    .id(("dnd-reorder-handle", ix))
                    .absolute()
                    .top_0()
                    .left_0()
                    .bottom_0()
                    .w(handle_width)
                    .cursor(CursorStyle::OpenHand)
                    .on_mouse_down(MouseButton::Left, record_press)
                    .on_drag(drag_value, start_drag),
            ),
            None => row
                .on_mouse_down(MouseButton::Left, record_press)
                .on_drag(drag_value, start_drag),
        }
    }
}

impl<T: 'static> Render for DndReorderListState<T> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if !cx.has_active_drag() && self.list.is_dragging() {
            self.on_drag_lost(cx);
        }

        let render_item = Rc::clone(&self.render_item);
        let state_entity = cx.entity();
        let list_id = cx.entity_id();
        let spacing = px(self.list.spacing());
        let settling = self.list.settle().is_some();
        let floating_ix = self
            .list
            .source_index()
            .or(self.list.settle().map(|settle| settle.row_ix));
        let floating_offset = self.list.floating_offset();

        let mut rows = Vec::with_capacity(self.list.len());
        for (ix, item) in self.list.items().iter().enumerate() {
            let directive = self.list.row_directive(ix);
            let selected = Some(ix) == self.selected_ix;
            let row_state = DndReorderRowState {
                selected,
                placeholder: directive.is_floating,
                floating: false,
            };

            let list_item = (render_item)(ix, item, row_state, window, cx);
            let is_disabled = item.is_disabled();
            let row = div()
                .id(ix)
                .relative()
                .w_full()
                .top(px(row_offset(directive)))
                .when(directive.is_floating, |this| this.opacity(0.))
                .child(list_item.disabled(is_disabled).selected(selected))
                .when(!is_disabled, |this| {
                    this.on_click(cx.listener(move |this, click_event, window, cx| {
                        this.on_entry_click(ix, click_event, window, cx);
                    }))
                });
            let row = if is_disabled {
                row
            } else {
                self.render_drag_source(row, ix, &state_entity, list_id)
            };

            rows.push(row);
        }

        let floating = floating_ix.and_then(|ix| {
            let item = self.list.items().get(ix)?;
            let row_state = DndReorderRowState {
                selected: true,
                placeholder: false,
                floating: true,
            };
            let list_item = (render_item)(ix, item, row_state, window, cx);
            let theme = cx.theme();
            let slot_top = self.list.top_offsets().get(ix).copied().unwrap_or(0.);

            let row = div()
                .id("dnd-reorder-floating")
                .absolute()
                .left_0()
                .right_0()
                .bg(theme.background)
                .border_1()
                .border_color(theme.drag_border)
                .rounded(px(6.))
                .shadow_md()
                .child(list_item.selected(true));

            Some(if settling {
                let animation_id = format!("dnd-reorder-settle-{}", self.settle_generation);
                row.with_animation(
                    ElementId::Name(animation_id.into()),
                    Animation::new(self.settle_duration).with_easing(ease_in_out),
                    move |this, delta| this.top(px(slot_top + floating_offset * (1. - delta))),
                )
                .into_any_element()
            } else {
                row.top(px(slot_top + floating_offset)).into_any_element()
            })
        });

        let rows_entity = state_entity.clone();
        div()
            .id("dnd-reorder-state")
            .size_full()
            .overflow_y_scroll()
            .on_drag_move::<DndReorderDrag>(cx.listener(Self::on_drag_move))
            .on_drop::<DndReorderDrag>(cx.listener(Self::on_drop))
            .child(
                div()
                    .relative()
                    .w_full()
                    .child(
                        v_flex()
                            .w_full()
                            .gap(spacing)
                            .children(rows)
                            .on_children_prepainted(move |bounds, _window, cx| {
                                rows_entity.update(cx, |state, cx| {
                                    state.on_rows_prepainted(bounds, cx);
                                });
                            }),
                    )
                    .when_some(floating, |this, floating: AnyElement| this.child(floating)),
            )
    }
}

/// A list element that reorders rows by dragging, sliding its other rows out of the way.
#[derive(IntoElement)]
pub struct DndReorderList<T: 'static> {
    id: ElementId,
    state: Entity<DndReorderListState<T>>,
    style: StyleRefinement,
    render_item:
        Rc<dyn Fn(usize, &DndReorderItem<T>, DndReorderRowState, &mut Window, &mut App) -> ListItem>,
}

impl<T: 'static> DndReorderList<T> {
    pub fn new<R>(state: &Entity<DndReorderListState<T>>, render_item: R) -> Self
    where
        R: Fn(usize, &DndReorderItem<T>, DndReorderRowState, &mut Window, &mut App) -> ListItem
            + 'static,
    {
        Self {
            id: ElementId::Name(format!("dnd-reorder-list-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_item: Rc::new(move |ix, item, row_state, window, cx| {
                render_item(ix, item, row_state, window, cx)
            }),
        }
    }
}

impl<T: 'static> Styled for DndReorderList<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: 'static> RenderOnce for DndReorderList<T> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        self.state
            .update(cx, |state, _| state.render_item = self.render_item);

        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .size_full()
            .child(self.state)
            .refine_style(&self.style)
    }
}

fn drop_proposal<T>(list: &ReorderList<DndReorderItem<T>>) -> Option<DndReorderProposal> {
    list.session().map(|session| DndReorderProposal {
        item_id: session.dragging_id().clone(),
        from: session.source_index(),
        to: session
            .target_index()
            .unwrap_or_else(|| session.source_index()),
    })
}

/// Commit an accepted drop, or settle a rejected one back into its source slot.
///
/// Returns the commit and whether `on_reorder` should hear about it. Accepted drops always notify,
/// including ones that land where they started.
fn settle_drop<T: ReorderItem>(
    list: &mut ReorderList<T>,
    ix: usize,
    allowed: bool,
) -> (Option<Commit<T::Id>>, bool) {
    if allowed {
        let commit = list.drag_ended(ix);
        let notify = commit.is_some();
        (commit, notify)
    } else {
        (list.cancel_drag(), false)
    }
}

/// Returns whether a settle needs to be scheduled.
fn cancel_lost_drag<T: ReorderItem>(list: &mut ReorderList<T>) -> bool {
    list.cancel_drag().is_some()
}

fn drag_origin(mouse_down: Option<Point<Pixels>>, current: Point<Pixels>) -> Point<Pixels> {
    mouse_down.unwrap_or(current)
}

fn row_size(bounds: &Bounds<Pixels>) -> RowSize {
    RowSize::new(bounds.size.width.into(), bounds.size.height.into())
}

fn translation_between(start: Point<Pixels>, position: Point<Pixels>) -> Translation {
    Translation::new(
        (position.x - start.x).into(),
        (position.y - start.y).into(),
    )
}

/// Vertical offset applied to an in-flow row.
fn row_offset(directive: RowDirective) -> f32 {
    if directive.is_floating {
        0.
    } else {
        directive.static_shift
    }
}
