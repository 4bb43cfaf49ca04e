//! Strongly-typed numeric primitives for sheet geometry.
//!
//! Two coordinate spaces exist:
//! - grid space, in cell units, where the cursor and glyph programs live
//!   (plain [`glam::DVec2`])
//! - physical space, in millimetres from the top-left corner of the page
//!   ([`Point<Mm>`]), which is what a canvas receives
//!
//! The only way from the first to the second is a [`GridTransform`].

use glam::DVec2;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in millimetres (physical page unit)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Mm(pub f64);

impl Mm {
    pub const ZERO: Mm = Mm(0.0);

    /// Create a length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Mm, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Mm(val))
        }
    }

    /// Create a non-negative length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Mm, NumericError> {
        let mm = Self::try_new(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(mm)
        }
    }

    /// Create a strictly positive length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Mm, NumericError> {
        let mm = Self::try_non_negative(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else {
            Ok(mm)
        }
    }

    /// PostScript points, as used by PDF user space
    #[inline]
    pub fn to_pt(self) -> f64 {
        self.0 * 72.0 / 25.4
    }
}

impl Add for Mm {
    type Output = Mm;
    fn add(self, rhs: Mm) -> Mm {
        Mm(self.0 + rhs.0)
    }
}

impl Sub for Mm {
    type Output = Mm;
    fn sub(self, rhs: Mm) -> Mm {
        Mm(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mm {
    type Output = Mm;
    fn mul(self, rhs: f64) -> Mm {
        Mm(self.0 * rhs)
    }
}

impl Div<f64> for Mm {
    type Output = Mm;
    fn div(self, rhs: f64) -> Mm {
        Mm(self.0 / rhs)
    }
}

// No Mm / Mm: cell counts go through GridGeometry, which validates the divisor.

impl AddAssign for Mm {
    fn add_assign(&mut self, rhs: Mm) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Mm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

/// Physical point on the page
pub type PtMm = Point<Mm>;

/// Stroke/fill colour with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb { r, g, b }
    }

    /// From 0-255 channel values (fractional values allowed)
    pub fn from_u8_scale(r: f64, g: f64, b: f64) -> Self {
        Rgb::new(r / 255.0, g / 255.0, b / 255.0)
    }

    fn channel_u8(c: f64) -> u8 {
        (c.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// `rgb(r,g,b)` with 0-255 integer channels
    pub fn to_rgb_string(self) -> String {
        format!(
            "rgb({},{},{})",
            Self::channel_u8(self.r),
            Self::channel_u8(self.g),
            Self::channel_u8(self.b)
        )
    }
}

/// Grid space → physical space: `physical = grid * side + origin`.
///
/// Fixed for a page once it has been laid out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTransform {
    side: Mm,
    origin: PtMm,
}

impl GridTransform {
    /// `side` must already be validated; [`GridGeometry::compute`] does that.
    ///
    /// [`GridGeometry::compute`]: crate::grid::GridGeometry::compute
    pub(crate) fn new(side: Mm, origin: PtMm) -> Self {
        GridTransform { side, origin }
    }

    /// Map a grid position to the page.
    pub fn point(&self, p: DVec2) -> PtMm {
        Point {
            x: self.side * p.x + self.origin.x,
            y: self.side * p.y + self.origin.y,
        }
    }

    /// Scale a grid-unit length (no translation).
    pub fn len(&self, units: f64) -> Mm {
        self.side * units
    }
}
