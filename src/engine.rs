use crate::buttons::{Buttons, DpadState};
use crate::config::ControllerConfig;
use crate::hotkey::{HotkeyBindings, HotkeyDecoder, HotkeyOutcome};
use crate::socd::{self, CleanedInput};
use crate::tracker::DirectionalStateTracker;

/// Everything the transport needs from one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub directions: CleanedInput,
    pub hotkeys: HotkeyOutcome,
}

/// Owns the controller config and runs one resolution pass per frame.
///
/// Direction cleaning for a frame always sees the config as it was before
/// that frame's hotkeys are applied.
#[derive(Clone, Debug)]
pub struct Engine {
    config: ControllerConfig,
    tracker: DirectionalStateTracker,
    hotkeys: HotkeyDecoder,
}

impl Engine {
    pub fn new(config: ControllerConfig, bindings: HotkeyBindings) -> Self {
        Engine {
            config,
            tracker: DirectionalStateTracker::new(),
            hotkeys: HotkeyDecoder::new(bindings),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn process_frame(&mut self, pressed: Buttons) -> Frame {
        let raw = DpadState::from_buttons(pressed);
        let directions = socd::resolve(&self.config, raw, &mut self.tracker);
        let hotkeys = self.hotkeys.process(pressed, &mut self.config);
        Frame {
            directions,
            hotkeys,
        }
    }
}
