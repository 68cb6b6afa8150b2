use crate::buttons::Buttons;
use crate::engine::Frame;
use crate::socd::{CleanedInput, Stick};

/// What the virtual gamepad reports after a frame.
///
/// While a hotkey chord matches, none of its buttons or directions are
/// reported; only the home and capture actions get through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GamepadReport {
    /// Held non-directional buttons. A1 and A2 are folded into `home` and
    /// `capture`.
    pub buttons: Buttons,
    pub dpad: Buttons,
    pub home: bool,
    pub capture: bool,
    pub left_stick: (i32, i32),
    pub right_stick: (i32, i32),
}

impl GamepadReport {
    pub fn new(held: Buttons, frame: &Frame) -> Self {
        let mut report = GamepadReport {
            home: frame.hotkeys.home,
            capture: frame.hotkeys.capture,
            ..Default::default()
        };
        if !frame.hotkeys.actions.is_empty() {
            return report;
        }

        report.buttons = held - Buttons::DPAD - Buttons::A1 - Buttons::A2;
        report.home |= held.contains(Buttons::A1);
        report.capture |= held.contains(Buttons::A2);
        match frame.directions {
            CleanedInput::Digital(dpad) => report.dpad = dpad.to_buttons(),
            CleanedInput::Analog { stick, x, y } => {
                let xy = (i32::from(x.get()), i32::from(y.get()));
                match stick {
                    Stick::Left => report.left_stick = xy,
                    Stick::Right => report.right_stick = xy,
                }
            }
        }
        report
    }
}
