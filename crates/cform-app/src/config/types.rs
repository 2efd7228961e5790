//! Configuration types for cform

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Global application settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Pixel width assumed for one terminal column when classifying the
    /// viewport
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: u16,

    /// Quiet window before a resize is applied
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,

    /// Label column width for left-placed labels
    #[serde(default = "default_label_width")]
    pub label_width: u16,
}

impl UiSettings {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            cell_width_px: default_cell_width_px(),
            resize_debounce_ms: default_resize_debounce_ms(),
            label_width: default_label_width(),
        }
    }
}

/// Behavior settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Ask before quitting with unsubmitted edits
    #[serde(default = "default_true")]
    pub confirm_quit: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self { confirm_quit: true }
    }
}

fn default_cell_width_px() -> u16 {
    8
}

fn default_resize_debounce_ms() -> u64 {
    500
}

fn default_label_width() -> u16 {
    24
}

fn default_true() -> bool {
    true
}
