// THEORY:
// The `CurveFamily` is the mathematical heart of the voting engine. It defines what
// a "shape instance" is: a pair of parameters `(a, b)` plus a handful of fixed
// constants. Its one job is to answer the question "how far is this point from lying
// exactly on the curve `(a, b)`?" through a non-negative residual.
//
// Families:
// - Line:   a = theta (degrees), b = signed distance r to the origin.
//           residual = | r - x*cos(theta) - y*sin(theta) |
// - Circle: a = x_c, b = y_c, fixed radius.
//           residual = | radius - sqrt((x_c - x)^2 + (y_c - y)^2) |
//
// The family set is small and closed, so it is a plain enum rather than a trait.
// Degenerate angles (cos or sin equal to zero) are ordinary evaluations here.

use crate::core_modules::point::point::Point;
use crate::error::InvalidInput;
use serde::{Deserialize, Serialize};

pub type Residual = f64;

/// Inclusive `(min, max)` range of one parameter axis.
pub type ParameterRange = (f64, f64);

/// A parametrized family of curves that points can vote for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveFamily {
    /// Straight lines in normal form `r = x*cos(theta) + y*sin(theta)`.
    Line,
    /// Circles of a single fixed radius, parametrized by their center.
    Circle {
        /// Target radius in pixels.
        radius: f64,
    },
}

impl CurveFamily {
    pub fn circle(radius: f64) -> Self {
        Self::Circle { radius }
    }

    /// Short lowercase name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Circle { .. } => "circle",
        }
    }

    /// Names of the two parameter axes, `(a, b)`.
    pub fn axis_names(&self) -> (&'static str, &'static str) {
        match self {
            Self::Line => ("theta", "r"),
            Self::Circle { .. } => ("x_c", "y_c"),
        }
    }

    /// Rejects non-positive or non-finite constants.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        match *self {
            Self::Line => Ok(()),
            Self::Circle { radius } => {
                if radius.is_finite() && radius > 0.0 {
                    Ok(())
                } else {
                    Err(InvalidInput::NonPositiveConstant {
                        name: "radius",
                        value: radius,
                    })
                }
            }
        }
    }

    /// Deviation of `point` from exact membership on the curve `(a, b)`.
    ///
    /// Always non-negative, and zero exactly when the point lies on the curve.
    /// For lines `a` is in degrees and is converted to radians here.
    #[inline]
    pub fn residual(&self, point: &Point, a: f64, b: f64) -> Residual {
        match *self {
            Self::Line => {
                let theta = a * std::f64::consts::PI / 180.0;
                (b - point.x * theta.cos() - point.y * theta.sin()).abs()
            }
            Self::Circle { radius } => {
                let dx = a - point.x;
                let dy = b - point.y;
                (radius - (dx * dx + dy * dy).sqrt()).abs()
            }
        }
    }

    /// Natural parameter ranges for an image of the given size.
    ///
    /// Line: theta in [0, 360], r in [-r_max, r_max] with
    /// `r_max = ceil(sqrt(h^2 + w^2)) + 1`.
    /// Circle: centers may sit up to one radius outside the image on every side.
    pub fn natural_ranges(&self, height: u32, width: u32) -> (ParameterRange, ParameterRange) {
        match *self {
            Self::Line => {
                let r_max = line_r_max(height, width);
                ((0.0, 360.0), (-r_max, r_max))
            }
            Self::Circle { radius } => (
                (-radius, width as f64 + radius),
                (-radius, height as f64 + radius),
            ),
        }
    }
}

/// Largest |r| the line family needs for an image of this size.
pub fn line_r_max(height: u32, width: u32) -> f64 {
    let h = height as f64;
    let w = width as f64;
    (h * h + w * w).sqrt().ceil() + 1.0
}
