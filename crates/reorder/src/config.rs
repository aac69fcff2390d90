use serde::Deserialize;

use crate::error::{ReorderError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Gap between consecutive rows. Absent means zero.
    pub spacing: Option<f32>,
}

impl ReorderConfig {
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn spacing(&self) -> f32 {
        self.spacing.unwrap_or(0.)
    }

    pub fn validate(&self) -> Result<()> {
        let spacing = self.spacing();
        if !spacing.is_finite() || spacing < 0. {
            return Err(ReorderError::InvalidSpacing(spacing));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_defaults_to_zero() {
        let config: ReorderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.spacing(), 0.);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn spacing_is_read_from_json() {
        let config: ReorderConfig = serde_json::from_str(r#"{ "spacing": 8.0 }"#).unwrap();
        assert_eq!(config, ReorderConfig::default().with_spacing(8.));
    }

    #[test]
    fn negative_spacing_is_rejected() {
        let config = ReorderConfig::default().with_spacing(-1.);
        assert_eq!(config.validate(), Err(ReorderError::InvalidSpacing(-1.)));
    }
}
