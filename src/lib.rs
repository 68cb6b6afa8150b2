//! SOCD cleaning and hotkey handling for hitbox-style controllers.

pub mod buttons;
pub mod config;
pub mod engine;
pub mod hotkey;
pub mod mode;
pub mod report;
pub mod socd;
pub mod tracker;

pub use buttons::{Buttons, DpadDirection, DpadState};
pub use config::ControllerConfig;
pub use engine::{Engine, Frame};
pub use hotkey::{GamepadHotkey, HotkeyBindings, HotkeyDecoder, HotkeyOutcome};
pub use mode::{AxisPolicy, DpadMode, InputMode, SocdMode};
pub use report::GamepadReport;
pub use socd::{AxisValue, CleanedInput, Stick};
pub use tracker::{AxisTracker, DirectionalStateTracker};
