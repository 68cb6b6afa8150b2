use bitflags::bitflags;

bitflags! {
    /// A snapshot of held physical buttons.
    #[derive(Default)]
    pub struct Buttons: u32 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const B1 = 1 << 4;
        const B2 = 1 << 5;
        const B3 = 1 << 6;
        const B4 = 1 << 7;
        const L1 = 1 << 8;
        const R1 = 1 << 9;
        const L2 = 1 << 10;
        const R2 = 1 << 11;
        const S1 = 1 << 12;
        const S2 = 1 << 13;
        const L3 = 1 << 14;
        const R3 = 1 << 15;
        const A1 = 1 << 16;
        const A2 = 1 << 17;

        const DPAD = Self::UP.bits | Self::DOWN.bits | Self::LEFT.bits | Self::RIGHT.bits;
    }
}

/// The most recently pressed of a pair of opposing directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DpadDirection {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

/// Raw or cleaned state of the four directional inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DpadState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DpadState {
    pub fn from_buttons(buttons: Buttons) -> Self {
        DpadState {
            up: buttons.contains(Buttons::UP),
            down: buttons.contains(Buttons::DOWN),
            left: buttons.contains(Buttons::LEFT),
            right: buttons.contains(Buttons::RIGHT),
        }
    }

    pub fn to_buttons(self) -> Buttons {
        let mut buttons = Buttons::empty();
        buttons.set(Buttons::UP, self.up);
        buttons.set(Buttons::DOWN, self.down);
        buttons.set(Buttons::LEFT, self.left);
        buttons.set(Buttons::RIGHT, self.right);
        buttons
    }
}
