use anyhow::anyhow;
use log::warn;
use std::fmt;
use std::str::FromStr;

/// Output protocol selected by the transport layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InputMode {
    #[default]
    XInput = 0,
    Switch = 1,
    Hid = 2,
    Config = 255,
}

impl TryFrom<u8> for InputMode {
    type Error = anyhow::Error;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(InputMode::XInput),
            1 => Ok(InputMode::Switch),
            2 => Ok(InputMode::Hid),
            255 => Ok(InputMode::Config),
            _ => Err(anyhow!("unknown input mode {}", raw)),
        }
    }
}

/// Where cleaned directions are reported: dpad bits or one of the sticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DpadMode {
    #[default]
    Digital = 0,
    LeftAnalog = 1,
    RightAnalog = 2,
}

impl DpadMode {
    pub const ALL: [DpadMode; 3] = [DpadMode::Digital, DpadMode::LeftAnalog, DpadMode::RightAnalog];

    /// Unknown values fall back to `Digital`.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => DpadMode::Digital,
            1 => DpadMode::LeftAnalog,
            2 => DpadMode::RightAnalog,
            _ => {
                warn!("unrecognized dpad mode {}, using digital", raw);
                DpadMode::Digital
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DpadMode::Digital => "digital",
            DpadMode::LeftAnalog => "left-analog",
            DpadMode::RightAnalog => "right-analog",
        }
    }
}

impl fmt::Display for DpadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DpadMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = normalize(s);
        DpadMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| anyhow!("unknown dpad mode {:?}", s))
    }
}

/// How one pair of opposing directions is cleaned when both are held.
///
/// `Negative` favours Up on the Y axis and Left on the X axis, `Positive`
/// favours Down and Right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisPolicy {
    Neutral,
    Negative,
    Positive,
    LastInput,
    FirstInput,
}

macro_rules! socd_modes {
    ($(
        $(#[$attr:meta])*
        $variant:ident = $raw:literal => ($x:ident, $y:ident), $name:literal;
    )*) => {
        /// SOCD cleaning method, as stored by the firmware configuration.
        ///
        /// The first three variants are the legacy modes; the rest are the
        /// cross product of an X policy and a Y policy.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum SocdMode {
            $($(#[$attr])* $variant = $raw,)*
        }

        impl SocdMode {
            pub const ALL: &'static [SocdMode] = &[$(SocdMode::$variant,)*];

            /// The `(x, y)` policies this mode applies.
            pub fn policies(self) -> (AxisPolicy, AxisPolicy) {
                match self {
                    $(SocdMode::$variant => (AxisPolicy::$x, AxisPolicy::$y),)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(SocdMode::$variant => $name,)*
                }
            }

            fn try_from_raw(raw: u8) -> Option<Self> {
                match raw {
                    $($raw => Some(SocdMode::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

socd_modes! {
    UpPriority = 0 => (Neutral, Negative), "up-priority";
    #[default]
    Neutral = 1 => (Neutral, Neutral), "neutral";
    SecondInputPriority = 2 => (LastInput, LastInput), "last-input";

    XNeutralYNeutral = 3 => (Neutral, Neutral), "x-neutral-y-neutral";
    XNeutralYDown = 4 => (Neutral, Positive), "x-neutral-y-down";
    XNeutralYUp = 5 => (Neutral, Negative), "x-neutral-y-up";
    XNeutralYLip = 6 => (Neutral, LastInput), "x-neutral-y-lip";
    XNeutralYFip = 7 => (Neutral, FirstInput), "x-neutral-y-fip";
    XLeftYNeutral = 8 => (Negative, Neutral), "x-left-y-neutral";
    XLeftYDown = 9 => (Negative, Positive), "x-left-y-down";
    XLeftYUp = 10 => (Negative, Negative), "x-left-y-up";
    XLeftYLip = 11 => (Negative, LastInput), "x-left-y-lip";
    XLeftYFip = 12 => (Negative, FirstInput), "x-left-y-fip";
    XRightYNeutral = 13 => (Positive, Neutral), "x-right-y-neutral";
    XRightYDown = 14 => (Positive, Positive), "x-right-y-down";
    XRightYUp = 15 => (Positive, Negative), "x-right-y-up";
    XRightYLip = 16 => (Positive, LastInput), "x-right-y-lip";
    XRightYFip = 17 => (Positive, FirstInput), "x-right-y-fip";
    XLipYNeutral = 18 => (LastInput, Neutral), "x-lip-y-neutral";
    XLipYDown = 19 => (LastInput, Positive), "x-lip-y-down";
    XLipYUp = 20 => (LastInput, Negative), "x-lip-y-up";
    XLipYLip = 21 => (LastInput, LastInput), "x-lip-y-lip";
    XLipYFip = 22 => (LastInput, FirstInput), "x-lip-y-fip";
    XFipYNeutral = 23 => (FirstInput, Neutral), "x-fip-y-neutral";
    XFipYDown = 24 => (FirstInput, Positive), "x-fip-y-down";
    XFipYUp = 25 => (FirstInput, Negative), "x-fip-y-up";
    XFipYLip = 26 => (FirstInput, LastInput), "x-fip-y-lip";
    XFipYFip = 27 => (FirstInput, FirstInput), "x-fip-y-fip";
}

const LEGACY_MODES: usize = 3;

impl SocdMode {
    /// Decodes a stored mode. Unknown values fail closed to `Neutral`.
    pub fn from_raw(raw: u8) -> Self {
        SocdMode::try_from_raw(raw).unwrap_or_else(|| {
            warn!("unrecognized SOCD mode {}, using neutral", raw);
            SocdMode::Neutral
        })
    }

    /// The comprehensive mode applying `x` to Left/Right and `y` to Up/Down.
    pub fn from_policies(x: AxisPolicy, y: AxisPolicy) -> Self {
        SocdMode::ALL
            .iter()
            .skip(LEGACY_MODES)
            .copied()
            .find(|mode| mode.policies() == (x, y))
            .unwrap_or(SocdMode::Neutral)
    }

    pub fn is_legacy(self) -> bool {
        (self as usize) < LEGACY_MODES
    }
}

impl fmt::Display for SocdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SocdMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = normalize(s);
        let s = match s.as_str() {
            "second-input-priority" | "lip" => "last-input",
            other => other,
        };
        SocdMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| anyhow!("unknown SOCD mode {:?}", s))
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('_', "-")
}
