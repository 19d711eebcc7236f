//! # Attachment Configuration
//!
//! Tuning for a single interactable item. Set once when the item is created
//! and read every physics tick while it is held.
//!
//! ```toml
//! reference_space = "HandGrip"
//! max_velocity_change = 1000.0
//! max_angular_velocity_change = 1000.0
//! max_angular_velocity = 100.0
//! use_sweep_movement = true
//! force_rotation_if_frozen = true
//! freeze_rotation_on_attach = false
//! unfreeze_rotation_on_detach = true
//! ```

use serde::{Serialize, Deserialize};

use super::{Config, ConfigError};
use crate::interaction::hand::HandReferenceSpace;

/// Per-item attachment tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Hand-relative frame an interaction point is matched against
    pub reference_space: HandReferenceSpace,

    /// Maximum change of linear velocity per tick (m/s)
    pub max_velocity_change: f32,

    /// Maximum change of angular velocity per tick (rad/s)
    pub max_angular_velocity_change: f32,

    /// Angular speed clamp written to the body when the item is prepared (rad/s)
    pub max_angular_velocity: f32,

    /// Snap the body directly when a sweep finds the way clear
    pub use_sweep_movement: bool,

    /// Write the target rotation directly while the body's rotation is frozen
    pub force_rotation_if_frozen: bool,

    /// Freeze body rotation when a hand attaches
    pub freeze_rotation_on_attach: bool,

    /// Unfreeze body rotation when the hand detaches
    pub unfreeze_rotation_on_detach: bool,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            reference_space: HandReferenceSpace::HandGrip,
            max_velocity_change: 1000.0,
            max_angular_velocity_change: 1000.0,
            max_angular_velocity: 100.0,
            use_sweep_movement: true,
            force_rotation_if_frozen: true,
            freeze_rotation_on_attach: false,
            unfreeze_rotation_on_detach: true,
        }
    }
}

impl Config for AttachmentConfig {}

impl AttachmentConfig {
    /// Set the reference space for interaction point matching
    pub fn with_reference_space(mut self, reference_space: HandReferenceSpace) -> Self {
        self.reference_space = reference_space;
        self
    }

    /// Set both per-tick velocity change limits
    pub fn with_rate_limits(mut self, max_velocity_change: f32, max_angular_velocity_change: f32) -> Self {
        self.max_velocity_change = max_velocity_change;
        self.max_angular_velocity_change = max_angular_velocity_change;
        self
    }

    /// Set the body angular speed clamp
    pub fn with_max_angular_velocity(mut self, max_angular_velocity: f32) -> Self {
        self.max_angular_velocity = max_angular_velocity;
        self
    }

    /// Enable or disable sweep-guarded snapping
    pub fn with_sweep_movement(mut self, enabled: bool) -> Self {
        self.use_sweep_movement = enabled;
        self
    }

    /// Enable or disable forced rotation while frozen
    pub fn with_force_rotation_if_frozen(mut self, enabled: bool) -> Self {
        self.force_rotation_if_frozen = enabled;
        self
    }

    /// Set rotation freezing at the attach/detach boundaries
    pub fn with_rotation_freeze(mut self, on_attach: bool, unfreeze_on_detach: bool) -> Self {
        self.freeze_rotation_on_attach = on_attach;
        self.unfreeze_rotation_on_detach = unfreeze_on_detach;
        self
    }

    /// Reject negative or non-finite limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_velocity_change", self.max_velocity_change),
            ("max_angular_velocity_change", self.max_angular_velocity_change),
            ("max_angular_velocity", self.max_angular_velocity),
        ];
        for (field, value) in limits {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults_match_authoring_defaults() {
        let config = AttachmentConfig::default();

        assert_eq!(config.reference_space, HandReferenceSpace::HandGrip);
        assert_eq!(config.max_velocity_change, 1000.0);
        assert_eq!(config.max_angular_velocity_change, 1000.0);
        assert_eq!(config.max_angular_velocity, 100.0);
        assert!(config.use_sweep_movement);
        assert!(config.force_rotation_if_frozen);
        assert!(!config.freeze_rotation_on_attach);
        assert!(config.unfreeze_rotation_on_detach);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let text = r#"
            max_velocity_change = 2.5
            use_sweep_movement = false
            reference_space = "Controller"
        "#;
        let config = AttachmentConfig::from_str_with_format(text, ConfigFormat::Toml).unwrap();

        assert_eq!(config.max_velocity_change, 2.5);
        assert!(!config.use_sweep_movement);
        assert_eq!(config.reference_space, HandReferenceSpace::Controller);
        assert_eq!(config.max_angular_velocity_change, 1000.0);
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = AttachmentConfig::default()
            .with_rate_limits(3.0, 4.0)
            .with_rotation_freeze(true, false);

        let text = config.to_string_with_format(ConfigFormat::Ron).unwrap();
        let parsed = AttachmentConfig::from_str_with_format(&text, ConfigFormat::Ron).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_negative_limit() {
        let config = AttachmentConfig::default().with_rate_limits(-1.0, 10.0);

        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "max_velocity_change"),
            other => panic!("expected invalid field error, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let result = AttachmentConfig::load_from_file("attachment.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
