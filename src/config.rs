use crate::mode::{DpadMode, InputMode, SocdMode};

/// Controller settings shared by the resolver (read) and the hotkey step
/// (write).
///
/// Values are injected at startup by whatever loads persisted settings; the
/// engine hands the updated value back whenever a hotkey changes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ControllerConfig {
    pub input_mode: InputMode,
    pub dpad_mode: DpadMode,
    pub socd_mode: SocdMode,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl ControllerConfig {
    /// Builds a config from stored raw values, falling back to neutral
    /// cleaning and digital output for anything unrecognized.
    pub fn from_raw(input_mode: InputMode, dpad_mode: u8, socd_mode: u8) -> Self {
        ControllerConfig {
            input_mode,
            dpad_mode: DpadMode::from_raw(dpad_mode),
            socd_mode: SocdMode::from_raw(socd_mode),
            ..Default::default()
        }
    }
}
