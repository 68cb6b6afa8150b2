use crate::buttons::Buttons;
use crate::config::ControllerConfig;
use crate::mode::{DpadMode, InputMode, SocdMode};
use bitflags::bitflags;
use log::debug;

bitflags! {
    /// Actions a hotkey chord can trigger.
    #[derive(Default)]
    pub struct GamepadHotkey: u16 {
        const DPAD_DIGITAL = 1 << 0;
        const DPAD_LEFT_ANALOG = 1 << 1;
        const DPAD_RIGHT_ANALOG = 1 << 2;
        const HOME_BUTTON = 1 << 3;
        const CAPTURE_BUTTON = 1 << 4;
        const SOCD_UP_PRIORITY = 1 << 5;
        const SOCD_NEUTRAL = 1 << 6;
        const SOCD_LAST_INPUT = 1 << 7;
        const INVERT_X_AXIS = 1 << 8;
        const INVERT_Y_AXIS = 1 << 9;
    }
}

impl GamepadHotkey {
    pub const NONE: GamepadHotkey = GamepadHotkey::empty();
}

#[derive(Clone, Copy, Debug)]
enum Effect {
    Dpad(DpadMode),
    Socd(SocdMode),
    Forward,
    InvertX,
    InvertY,
}

// Ascending bit order. Later entries win when several mode writes match in
// the same frame.
const EFFECTS: [(GamepadHotkey, Effect); 10] = [
    (GamepadHotkey::DPAD_DIGITAL, Effect::Dpad(DpadMode::Digital)),
    (GamepadHotkey::DPAD_LEFT_ANALOG, Effect::Dpad(DpadMode::LeftAnalog)),
    (GamepadHotkey::DPAD_RIGHT_ANALOG, Effect::Dpad(DpadMode::RightAnalog)),
    (GamepadHotkey::HOME_BUTTON, Effect::Forward),
    (GamepadHotkey::CAPTURE_BUTTON, Effect::Forward),
    (GamepadHotkey::SOCD_UP_PRIORITY, Effect::Socd(SocdMode::UpPriority)),
    (GamepadHotkey::SOCD_NEUTRAL, Effect::Socd(SocdMode::Neutral)),
    (GamepadHotkey::SOCD_LAST_INPUT, Effect::Socd(SocdMode::SecondInputPriority)),
    (GamepadHotkey::INVERT_X_AXIS, Effect::InvertX),
    (GamepadHotkey::INVERT_Y_AXIS, Effect::InvertY),
];

/// Chord to action table. A chord matches only when exactly its buttons are
/// held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HotkeyBindings {
    bindings: Vec<(Buttons, GamepadHotkey)>,
}

impl HotkeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding. Empty chords never match and are ignored.
    pub fn bind(mut self, chord: Buttons, hotkey: GamepadHotkey) -> Self {
        if !chord.is_empty() && !hotkey.is_empty() {
            self.bindings.push((chord, hotkey));
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Buttons, GamepadHotkey)> {
        self.bindings.iter()
    }

    /// F1 (S1+S2) and F2 (S2+A1) combined with a direction, plus the stick
    /// clicks on F1 for axis inversion.
    pub fn firmware_defaults() -> Self {
        let f1 = Buttons::S1 | Buttons::S2;
        let f2 = Buttons::S2 | Buttons::A1;
        HotkeyBindings::new()
            .bind(f1 | Buttons::DOWN, GamepadHotkey::DPAD_DIGITAL)
            .bind(f1 | Buttons::LEFT, GamepadHotkey::DPAD_LEFT_ANALOG)
            .bind(f1 | Buttons::RIGHT, GamepadHotkey::DPAD_RIGHT_ANALOG)
            .bind(f1 | Buttons::UP, GamepadHotkey::HOME_BUTTON)
            .bind(f1 | Buttons::L3, GamepadHotkey::INVERT_X_AXIS)
            .bind(f1 | Buttons::R3, GamepadHotkey::INVERT_Y_AXIS)
            .bind(f2 | Buttons::UP, GamepadHotkey::SOCD_UP_PRIORITY)
            .bind(f2 | Buttons::DOWN, GamepadHotkey::SOCD_NEUTRAL)
            .bind(f2 | Buttons::LEFT, GamepadHotkey::SOCD_LAST_INPUT)
            .bind(f2 | Buttons::RIGHT, GamepadHotkey::CAPTURE_BUTTON)
    }
}

/// The union of every binding whose chord equals `pressed`.
pub fn decode(pressed: Buttons, bindings: &HotkeyBindings) -> GamepadHotkey {
    bindings
        .iter()
        .filter(|(chord, _)| *chord == pressed)
        .fold(GamepadHotkey::NONE, |acc, (_, hotkey)| acc | *hotkey)
}

/// Result of one frame of hotkey handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HotkeyOutcome {
    pub actions: GamepadHotkey,
    pub home: bool,
    pub capture: bool,
    /// The config was modified and should be offered for persistence.
    pub config_changed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HotkeyDecoder {
    bindings: HotkeyBindings,
    // Held buttons of the previous frame. Chords match exactly, so a chord
    // starts matching exactly when the held set changes.
    previous: Buttons,
}

impl HotkeyDecoder {
    pub fn new(bindings: HotkeyBindings) -> Self {
        HotkeyDecoder {
            bindings,
            previous: Buttons::empty(),
        }
    }

    pub fn bindings(&self) -> &HotkeyBindings {
        &self.bindings
    }

    /// Decodes `pressed` and applies the matched actions to `config`.
    ///
    /// Mode writes are applied every frame the chord is held. Axis inversion
    /// toggles only on the frame a chord starts matching, including when the
    /// player moves straight from one bound chord to another. Nothing is
    /// applied while the controller is in config mode.
    pub fn process(&mut self, pressed: Buttons, config: &mut ControllerConfig) -> HotkeyOutcome {
        let actions = decode(pressed, &self.bindings);
        let started = if pressed == self.previous {
            GamepadHotkey::NONE
        } else {
            actions
        };
        self.previous = pressed;

        if config.input_mode == InputMode::Config {
            return HotkeyOutcome {
                actions,
                ..Default::default()
            };
        }

        let before = *config;
        for (flag, effect) in EFFECTS.iter() {
            if !actions.contains(*flag) {
                continue;
            }
            match *effect {
                Effect::Dpad(mode) => config.dpad_mode = mode,
                Effect::Socd(mode) => config.socd_mode = mode,
                Effect::Forward => {}
                Effect::InvertX if started.contains(*flag) => config.invert_x = !config.invert_x,
                Effect::InvertY if started.contains(*flag) => config.invert_y = !config.invert_y,
                Effect::InvertX | Effect::InvertY => {}
            }
        }

        let config_changed = *config != before;
        if config_changed {
            debug!("hotkey {:?} changed config: {:?} -> {:?}", actions, before, config);
        }
        HotkeyOutcome {
            actions,
            home: actions.contains(GamepadHotkey::HOME_BUTTON),
            capture: actions.contains(GamepadHotkey::CAPTURE_BUTTON),
            config_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn a_b() -> Buttons {
        Buttons::B1 | Buttons::B2
    }

    #[test]
    fn chord_sets_socd_neutral() {
        let bindings = HotkeyBindings::new().bind(a_b(), GamepadHotkey::SOCD_NEUTRAL);
        let mut decoder = HotkeyDecoder::new(bindings);
        let mut config = ControllerConfig {
            socd_mode: SocdMode::XLipYLip,
            ..Default::default()
        };
        let outcome = decoder.process(a_b(), &mut config);
        assert_eq!(outcome.actions, GamepadHotkey::SOCD_NEUTRAL);
        assert!(outcome.config_changed);
        assert_eq!(config.socd_mode, SocdMode::Neutral);
    }

    #[test_case(Buttons::B1; "subset")]
    #[test_case(Buttons::B1 | Buttons::B2 | Buttons::UP; "superset")]
    #[test_case(Buttons::empty(); "nothing held")]
    fn requires_exact_chord(pressed: Buttons) {
        let bindings = HotkeyBindings::new().bind(a_b(), GamepadHotkey::SOCD_NEUTRAL);
        assert_eq!(decode(pressed, &bindings), GamepadHotkey::NONE);
    }

    #[test]
    fn empty_chords_are_not_bound() {
        let bindings = HotkeyBindings::new().bind(Buttons::empty(), GamepadHotkey::HOME_BUTTON);
        assert_eq!(bindings.iter().count(), 0);
        assert_eq!(decode(Buttons::empty(), &bindings), GamepadHotkey::NONE);
    }

    #[test]
    fn highest_bit_wins_conflicting_writes() {
        let bindings = HotkeyBindings::new()
            .bind(a_b(), GamepadHotkey::SOCD_LAST_INPUT)
            .bind(a_b(), GamepadHotkey::SOCD_UP_PRIORITY | GamepadHotkey::DPAD_RIGHT_ANALOG)
            .bind(a_b(), GamepadHotkey::DPAD_LEFT_ANALOG);
        let mut decoder = HotkeyDecoder::new(bindings);
        let mut config = ControllerConfig::default();
        let outcome = decoder.process(a_b(), &mut config);
        assert_eq!(
            outcome.actions,
            GamepadHotkey::SOCD_LAST_INPUT
                | GamepadHotkey::SOCD_UP_PRIORITY
                | GamepadHotkey::DPAD_RIGHT_ANALOG
                | GamepadHotkey::DPAD_LEFT_ANALOG
        );
        assert_eq!(config.socd_mode, SocdMode::SecondInputPriority);
        assert_eq!(config.dpad_mode, DpadMode::RightAnalog);
    }

    #[test]
    fn home_and_capture_are_forwarded_while_held() {
        let mut decoder = HotkeyDecoder::new(HotkeyBindings::firmware_defaults());
        let mut config = ControllerConfig::default();
        let home = Buttons::S1 | Buttons::S2 | Buttons::UP;
        for _ in 0..3 {
            let outcome = decoder.process(home, &mut config);
            assert!(outcome.home);
            assert!(!outcome.capture);
            assert!(!outcome.config_changed);
        }
        let capture = Buttons::S2 | Buttons::A1 | Buttons::RIGHT;
        let outcome = decoder.process(capture, &mut config);
        assert!(outcome.capture && !outcome.home);
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn invert_toggles_once_per_press() {
        let chord = Buttons::S1 | Buttons::S2 | Buttons::L3;
        let mut decoder = HotkeyDecoder::new(HotkeyBindings::firmware_defaults());
        let mut config = ControllerConfig::default();
        assert!(decoder.process(chord, &mut config).config_changed);
        assert!(config.invert_x);
        assert!(!decoder.process(chord, &mut config).config_changed);
        assert!(config.invert_x);
        let _ = decoder.process(Buttons::empty(), &mut config);
        let _ = decoder.process(chord, &mut config);
        assert!(!config.invert_x);
        assert!(!config.invert_y);
    }

    #[test]
    fn invert_toggles_when_sliding_between_chords() {
        let first = Buttons::S1 | Buttons::S2 | Buttons::L3;
        let second = first | Buttons::R1;
        let bindings = HotkeyBindings::new()
            .bind(first, GamepadHotkey::INVERT_X_AXIS)
            .bind(second, GamepadHotkey::INVERT_X_AXIS);
        let mut decoder = HotkeyDecoder::new(bindings);
        let mut config = ControllerConfig::default();
        let _ = decoder.process(first, &mut config);
        assert!(config.invert_x);
        let _ = decoder.process(second, &mut config);
        assert!(!config.invert_x);
        let _ = decoder.process(second, &mut config);
        assert!(!config.invert_x);
        let _ = decoder.process(first, &mut config);
        assert!(config.invert_x);
    }

    #[test]
    fn mode_writes_repeat_without_reporting_changes() {
        let chord = Buttons::S1 | Buttons::S2 | Buttons::LEFT;
        let mut decoder = HotkeyDecoder::new(HotkeyBindings::firmware_defaults());
        let mut config = ControllerConfig::default();
        assert!(decoder.process(chord, &mut config).config_changed);
        assert_eq!(config.dpad_mode, DpadMode::LeftAnalog);
        assert!(!decoder.process(chord, &mut config).config_changed);
    }

    #[test]
    fn config_mode_applies_nothing() {
        let mut decoder = HotkeyDecoder::new(HotkeyBindings::firmware_defaults());
        let mut config = ControllerConfig {
            input_mode: InputMode::Config,
            ..Default::default()
        };
        let outcome = decoder.process(Buttons::S2 | Buttons::A1 | Buttons::LEFT, &mut config);
        assert_eq!(outcome.actions, GamepadHotkey::SOCD_LAST_INPUT);
        assert!(!outcome.config_changed);
        assert_eq!(config.socd_mode, SocdMode::Neutral);
    }

    #[test_case(Buttons::S2 | Buttons::A1 | Buttons::UP, SocdMode::UpPriority)]
    #[test_case(Buttons::S2 | Buttons::A1 | Buttons::DOWN, SocdMode::Neutral)]
    #[test_case(Buttons::S2 | Buttons::A1 | Buttons::LEFT, SocdMode::SecondInputPriority)]
    fn default_socd_chords(chord: Buttons, expected: SocdMode) {
        let mut decoder = HotkeyDecoder::new(HotkeyBindings::firmware_defaults());
        let mut config = ControllerConfig {
            socd_mode: SocdMode::XFipYFip,
            ..Default::default()
        };
        let _ = decoder.process(chord, &mut config);
        assert_eq!(config.socd_mode, expected);
    }
}
