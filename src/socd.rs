use crate::buttons::{DpadDirection, DpadState};
use crate::config::ControllerConfig;
use crate::mode::{AxisPolicy, DpadMode};
use crate::tracker::{AxisTracker, DirectionalStateTracker};
use bounded_integer::bounded_integer;
use log::trace;

bounded_integer! {
    /// One emulated stick axis. Up and Left are negative.
    #[repr(i8)]
    pub struct AxisValue { -127..=127 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stick {
    Left,
    Right,
}

/// Directional output of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanedInput {
    Digital(DpadState),
    Analog {
        stick: Stick,
        x: AxisValue,
        y: AxisValue,
    },
}

impl CleanedInput {
    pub fn directions(&self) -> DpadState {
        match *self {
            CleanedInput::Digital(dpad) => dpad,
            CleanedInput::Analog { x, y, .. } => DpadState {
                up: y.get() < 0,
                down: y.get() > 0,
                left: x.get() < 0,
                right: x.get() > 0,
            },
        }
    }
}

/// Runs one frame of SOCD cleaning.
///
/// The tracker is updated with `raw` first, so it must be called exactly once
/// per frame. Inversion is applied after cleaning: policies always name the
/// physical buttons.
pub fn resolve(
    config: &ControllerConfig,
    raw: DpadState,
    tracker: &mut DirectionalStateTracker,
) -> CleanedInput {
    tracker.update(raw);

    let mut dpad = clean(config.socd_mode.policies(), raw, tracker);
    if config.invert_x {
        std::mem::swap(&mut dpad.left, &mut dpad.right);
    }
    if config.invert_y {
        std::mem::swap(&mut dpad.up, &mut dpad.down);
    }
    trace!("socd {}: {:?} -> {:?}", config.socd_mode, raw, dpad);

    match config.dpad_mode {
        DpadMode::Digital => CleanedInput::Digital(dpad),
        DpadMode::LeftAnalog => analog(Stick::Left, dpad),
        DpadMode::RightAnalog => analog(Stick::Right, dpad),
    }
}

/// Applies `(x, y)` policies to `raw` using the tracker's press history.
pub fn clean(
    (x, y): (AxisPolicy, AxisPolicy),
    raw: DpadState,
    tracker: &DirectionalStateTracker,
) -> DpadState {
    let (up, down) = clean_axis(
        y,
        (raw.up, raw.down),
        tracker.y(),
        (DpadDirection::Up, DpadDirection::Down),
    );
    let (left, right) = clean_axis(
        x,
        (raw.left, raw.right),
        tracker.x(),
        (DpadDirection::Left, DpadDirection::Right),
    );
    DpadState {
        up,
        down,
        left,
        right,
    }
}

fn clean_axis(
    policy: AxisPolicy,
    (negative, positive): (bool, bool),
    tracker: &AxisTracker,
    (negative_dir, positive_dir): (DpadDirection, DpadDirection),
) -> (bool, bool) {
    if !(negative && positive) {
        return (negative, positive);
    }
    let winner = match policy {
        AxisPolicy::Neutral => DpadDirection::None,
        AxisPolicy::Negative => negative_dir,
        AxisPolicy::Positive => positive_dir,
        AxisPolicy::LastInput => tracker.last(),
        AxisPolicy::FirstInput => tracker.first(),
    };
    (winner == negative_dir, winner == positive_dir)
}

fn analog(stick: Stick, dpad: DpadState) -> CleanedInput {
    CleanedInput::Analog {
        stick,
        x: axis(dpad.left, dpad.right),
        y: axis(dpad.up, dpad.down),
    }
}

fn axis(negative: bool, positive: bool) -> AxisValue {
    match (negative, positive) {
        (true, false) => AxisValue::MIN,
        (false, true) => AxisValue::MAX,
        _ => AxisValue::new_saturating(0),
    }
}
