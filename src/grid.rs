//! Page parameters, derived grid geometry and the grid layout pass.
//!
//! Geometry is computed once per document from a [`PageSpec`]; the layout pass
//! then draws the same grid on every page, shifted by the page's origin.

use crate::canvas::Canvas;
use crate::errors::ConfigError;
use crate::log::debug;
use crate::types::{Mm, NumericError, Point, PtMm, Rgb};

/// Physical page and grid parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub width: Mm,
    pub height: Mm,
    /// Space kept free around the grid
    pub margin: Mm,
    /// Cell side
    pub side: Mm,
    /// Extra left space on odd pages, for binding
    pub sheet_offset: Mm,
    /// Every `thick`-th interior line is heavier; 0 disables
    pub thick: u32,
    /// Thicken vertical lines too
    pub vertical: bool,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            width: Mm(210.0),
            height: Mm(297.0),
            margin: Mm(16.0),
            side: Mm(4.0),
            sheet_offset: Mm::ZERO,
            thick: 3,
            vertical: false,
        }
    }
}

impl PageSpec {
    /// Whether horizontal line `i` (1-based from the top) is thick
    pub fn is_thick_row(&self, i: u32) -> bool {
        self.thick != 0 && i % self.thick == 0
    }

    /// Whether vertical line `i` (1-based from the left) is thick
    pub fn is_thick_column(&self, i: u32) -> bool {
        self.vertical && self.is_thick_row(i)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("page width", Mm::try_positive(self.width.0)),
            ("page height", Mm::try_positive(self.height.0)),
            ("margin", Mm::try_non_negative(self.margin.0)),
            ("cell side", Mm::try_positive(self.side.0)),
            ("sheet offset", Mm::try_non_negative(self.sheet_offset.0)),
        ];
        for (name, check) in checks {
            check.map_err(|reason| ConfigError::InvalidLength { name, reason })?;
        }
        Ok(())
    }
}

/// Cell counts and centering margins derived from a [`PageSpec`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub num_x: u32,
    pub num_y: u32,
    /// Horizontal centering margin, not counting the sheet offset
    pub center_x: Mm,
    pub center_y: Mm,
}

impl GridGeometry {
    /// Round the usable area to whole cells and center the result.
    ///
    /// Halfway counts round to even. Fails if either count is not positive.
    pub fn compute(spec: &PageSpec) -> Result<Self, ConfigError> {
        spec.validate()?;

        let usable_x = spec.width - spec.margin * 2.0 - spec.sheet_offset;
        let usable_y = spec.height - spec.margin * 2.0;
        let num_x = count("x", usable_x, spec.side)?;
        let num_y = count("y", usable_y, spec.side)?;

        let geometry = Self {
            num_x,
            num_y,
            center_x: (spec.width - spec.sheet_offset - spec.side * num_x as f64) / 2.0,
            center_y: (spec.height - spec.side * num_y as f64) / 2.0,
        };
        debug!(?geometry, "grid geometry");
        Ok(geometry)
    }

    /// Grid extent on the page
    pub fn size(&self, side: Mm) -> (Mm, Mm) {
        (side * self.num_x as f64, side * self.num_y as f64)
    }
}

fn count(axis: &'static str, usable: Mm, side: Mm) -> Result<u32, ConfigError> {
    let n = (usable.0 / side.0).round_ties_even();
    if n < 1.0 {
        return Err(ConfigError::EmptyGrid {
            axis,
            count: n as i64,
        });
    }
    u32::try_from(n as i64).map_err(|_| ConfigError::InvalidLength {
        name: "cell side",
        reason: NumericError::Infinite,
    })
}

/// Stroke colours and widths for the grid and the text on top of it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub line_color: Rgb,
    pub border_color: Rgb,
    pub text_color: Rgb,
    pub thin_width: Mm,
    pub thick_width: Mm,
    pub border_width: Mm,
    pub text_width: Mm,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            line_color: Rgb::from_u8_scale(127.5, 127.5, 127.5),
            border_color: Rgb::BLACK,
            text_color: Rgb::BLACK,
            thin_width: Mm(0.05),
            thick_width: Mm(0.2),
            border_width: Mm(0.4),
            text_width: Mm(0.4),
        }
    }
}

/// Draw the grid with its top-left corner at `origin`.
///
/// Interior horizontal lines first, then interior vertical lines, then the
/// border clockwise from the top edge.
pub fn layout<C: Canvas + ?Sized>(
    canvas: &mut C,
    spec: &PageSpec,
    geometry: &GridGeometry,
    style: &GridStyle,
    origin: PtMm,
) {
    let (grid_w, grid_h) = geometry.size(spec.side);
    let at = |x: Mm, y: Mm| Point::new(origin.x + x, origin.y + y);
    let width_for = |thick: bool| {
        if thick {
            style.thick_width
        } else {
            style.thin_width
        }
    };

    canvas.set_stroke_color(style.line_color);

    for i in 1..geometry.num_y {
        let y = spec.side * i as f64;
        canvas.set_stroke_width(width_for(spec.is_thick_row(i)));
        canvas.draw_line(at(Mm::ZERO, y), at(grid_w, y));
    }

    for i in 1..geometry.num_x {
        let x = spec.side * i as f64;
        canvas.set_stroke_width(width_for(spec.is_thick_column(i)));
        canvas.draw_line(at(x, Mm::ZERO), at(x, grid_h));
    }

    canvas.set_stroke_width(style.border_width);
    canvas.set_stroke_color(style.border_color);
    canvas.draw_line(at(Mm::ZERO, Mm::ZERO), at(grid_w, Mm::ZERO));
    canvas.draw_line(at(grid_w, Mm::ZERO), at(grid_w, grid_h));
    canvas.draw_line(at(grid_w, grid_h), at(Mm::ZERO, grid_h));
    canvas.draw_line(at(Mm::ZERO, grid_h), at(Mm::ZERO, Mm::ZERO));
}
