use derive_more::{Add, AddAssign, Deref, Display, From, Into, Mul, Neg, Sub, Sum};
use serde::{Deserialize, Serialize};

/// A length in physical pixels, the unit text backends report geometry in.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    Neg,
    Mul,
    Sum,
    Deref,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display("{_0}px")]
pub struct Px(pub f32);

impl Px {
    /// Drop the fractional part, rounding toward zero. Backends hand back
    /// sub-pixel values but frames are laid out on whole pixels.
    pub fn trunc(self) -> Px {
        Px(self.0.trunc())
    }

    /// Round down to the nearest whole pixel
    pub fn floor(self) -> Px {
        Px(self.0.floor())
    }

    pub fn to_dip(self, metrics: &DisplayMetrics) -> Dip {
        metrics.to_dip(self)
    }
}

/// A device-independent length, the unit used at the notification boundary.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    Mul,
    Deref,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display("{_0}dp")]
pub struct Dip(pub f32);

/// Screen density used to convert between [Px] and [Dip].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayMetrics {
    /// Physical pixels per device-independent pixel
    pub density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        DisplayMetrics { density: 1.0 }
    }
}

impl DisplayMetrics {
    pub fn new(density: f32) -> DisplayMetrics {
        DisplayMetrics { density }
    }

    pub fn to_dip(&self, px: Px) -> Dip {
        Dip(px.0 / self.density)
    }

    pub fn to_px(&self, dip: Dip) -> Px {
        Px(dip.0 * self.density)
    }
}
