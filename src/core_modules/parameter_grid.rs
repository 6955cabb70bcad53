// THEORY:
// The `ParameterGrid` turns a continuous parameter space into the lattice of cells
// the accumulator votes into. It is sized once from the image dimensions and the
// family's constants, and is read-only for the rest of its life.
//
// Key architectural principles:
// 1.  **Unit Steps**: Both axes are sampled at one unit of their natural measure:
//     one degree for line angles, one pixel for distances and circle centers. A
//     fractional circle radius is the one exception: its center range is not a whole
//     number of pixels, so the step is stretched or shrunk to fit it evenly.
// 2.  **Boundary-Inclusive Sampling**: An axis over `[min, max]` at step `s` holds
//     exactly `(max - min) / s + 1` samples. Samples are `min + i * step` and the last
//     one is pinned to `max`, so both ends land exactly on the lattice.
// 3.  **Immutability**: There are no mutating methods. Workers may share a grid
//     freely behind an `Arc`.

use crate::core_modules::curve_family::{CurveFamily, ParameterRange};
use crate::error::InvalidInput;

/// Unit step in the family's natural units (pixels or degrees).
pub const UNIT_STEP: f64 = 1.0;

/// One evenly spaced, boundary-inclusive axis of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    min: f64,
    max: f64,
    step: f64,
    samples: Vec<f64>,
}

impl Axis {
    /// `count` evenly spaced samples over `[min, max]`, both ends included.
    pub fn linspace(min: f64, max: f64, count: usize) -> Self {
        let step = if count > 1 {
            (max - min) / (count - 1) as f64
        } else {
            0.0
        };
        let mut samples: Vec<f64> = (0..count).map(|i| min + i as f64 * step).collect();
        if count > 1 {
            samples[count - 1] = max;
        }
        Self {
            min,
            max,
            step,
            samples,
        }
    }

    /// Samples `range` at `step`, keeping both boundaries.
    ///
    /// The sample count is `round((max - min) / step) + 1`. When `step` does not
    /// divide the range the samples are respaced evenly over it, so the stored step
    /// differs from the requested one. A circle with a fractional radius gets such an
    /// axis, e.g. radius 0.3 over a 10 px image gives 12 samples 0.9636... apart.
    pub fn with_step(range: ParameterRange, step: f64) -> Self {
        let (min, max) = range;
        let count = ((max - min) / step).round() as usize + 1;
        Self::linspace(min, max, count)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    /// Index of the sample nearest to `value`, if it falls inside the axis.
    ///
    /// Non-finite values never match a sample.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        if self.samples.is_empty() || !value.is_finite() || value < self.min || value > self.max {
            return None;
        }
        if self.step == 0.0 {
            return Some(0);
        }
        let idx = ((value - self.min) / self.step).round() as usize;
        Some(idx.min(self.samples.len() - 1))
    }
}

/// A rectangular lattice of parameter cells: axis A by axis B.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    axis_a: Axis,
    axis_b: Axis,
}

impl ParameterGrid {
    /// Builds the unit-step grid over the family's natural ranges.
    pub fn new(family: &CurveFamily, height: u32, width: u32) -> Result<Self, InvalidInput> {
        if height == 0 || width == 0 {
            return Err(InvalidInput::NonPositiveDimensions { height, width });
        }
        family.validate()?;

        let (range_a, range_b) = family.natural_ranges(height, width);
        Self::from_axes(
            Axis::with_step(range_a, UNIT_STEP),
            Axis::with_step(range_b, UNIT_STEP),
        )
    }

    /// Wraps two prebuilt axes, rejecting an empty one.
    pub fn from_axes(axis_a: Axis, axis_b: Axis) -> Result<Self, InvalidInput> {
        let grid = Self { axis_a, axis_b };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.axis_a.is_empty() {
            return Err(InvalidInput::DegenerateGrid { axis: "a", len: 0 });
        }
        if self.axis_b.is_empty() {
            return Err(InvalidInput::DegenerateGrid { axis: "b", len: 0 });
        }
        Ok(())
    }

    pub fn axis_a(&self) -> &Axis {
        &self.axis_a
    }

    pub fn axis_b(&self) -> &Axis {
        &self.axis_b
    }

    /// `(|A|, |B|)`
    pub fn shape(&self) -> (usize, usize) {
        (self.axis_a.len(), self.axis_b.len())
    }

    pub fn cell_count(&self) -> usize {
        self.axis_a.len() * self.axis_b.len()
    }

    /// Parameter pair of cell `(i_a, i_b)`.
    pub fn params(&self, i_a: usize, i_b: usize) -> Option<(f64, f64)> {
        Some((self.axis_a.get(i_a)?, self.axis_b.get(i_b)?))
    }

    /// Cell indices nearest to the parameter pair `(a, b)`.
    pub fn cell_of(&self, a: f64, b: f64) -> Option<(usize, usize)> {
        Some((self.axis_a.index_of(a)?, self.axis_b.index_of(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn line_grid_counts_match_closed_form() {
        for &(h, w) in &[(10u32, 10u32), (1, 1), (480, 640), (7, 300)] {
            let grid = ParameterGrid::new(&CurveFamily::Line, h, w).unwrap();
            let diag = ((h as f64).powi(2) + (w as f64).powi(2)).sqrt().ceil() as usize;
            assert_eq!(grid.axis_a().len(), 361);
            assert_eq!(grid.axis_b().len(), 2 * diag + 3);
        }
    }

    #[test]
    fn circle_grid_counts_match_closed_form() {
        for &(h, w, r) in &[(10u32, 20u32, 1u32), (200, 300, 40), (5, 5, 17)] {
            let grid = ParameterGrid::new(&CurveFamily::circle(r as f64), h, w).unwrap();
            assert_eq!(grid.axis_a().len(), (w + 2 * r + 1) as usize);
            assert_eq!(grid.axis_b().len(), (h + 2 * r + 1) as usize);
        }
    }

    #[test]
    fn axes_are_boundary_inclusive_unit_steps() {
        let grid = ParameterGrid::new(&CurveFamily::Line, 10, 10).unwrap();
        let theta = grid.axis_a();
        assert_eq!(theta.samples()[0], 0.0);
        assert_eq!(theta.samples()[360], 360.0);
        assert_eq!(theta.samples()[90], 90.0);
        assert_eq!(theta.step(), 1.0);

        let r = grid.axis_b();
        assert_eq!(r.min(), -16.0);
        assert_eq!(r.max(), 16.0);
        assert_eq!(r.samples()[16], 0.0);
        assert!(r.samples().windows(2).all(|w| w[1] - w[0] == 1.0));
    }

    #[test]
    fn circle_centers_extend_beyond_the_image() {
        let grid = ParameterGrid::new(&CurveFamily::circle(40.0), 200, 300).unwrap();
        assert_eq!(grid.axis_a().samples()[0], -40.0);
        assert_eq!(grid.axis_a().samples()[grid.axis_a().len() - 1], 340.0);
        assert_eq!(grid.axis_b().samples()[0], -40.0);
        assert_eq!(grid.axis_b().samples()[grid.axis_b().len() - 1], 240.0);
    }

    #[test]
    fn cell_lookup_round_trips_through_params() {
        let grid = ParameterGrid::new(&CurveFamily::circle(40.0), 200, 200).unwrap();
        let (ia, ib) = grid.cell_of(100.0, 60.0).unwrap();
        assert_eq!(grid.params(ia, ib), Some((100.0, 60.0)));
        assert_eq!(grid.cell_of(-41.0, 0.0), None);
        assert_eq!(grid.params(grid.axis_a().len(), 0), None);
    }

    #[test]
    fn rejects_bad_dimensions_and_constants() {
        assert_eq!(
            ParameterGrid::new(&CurveFamily::Line, 0, 10),
            Err(InvalidInput::NonPositiveDimensions { height: 0, width: 10 })
        );
        assert!(matches!(
            ParameterGrid::new(&CurveFamily::circle(0.0), 10, 10),
            Err(InvalidInput::NonPositiveConstant { name: "radius", .. })
        ));
    }

    #[test]
    fn empty_axis_is_degenerate() {
        let result =
            ParameterGrid::from_axes(Axis::linspace(0.0, 1.0, 0), Axis::linspace(0.0, 1.0, 2));
        assert_eq!(result, Err(InvalidInput::DegenerateGrid { axis: "a", len: 0 }));
    }

    #[test]
    fn nan_lookup_finds_no_cell() {
        let grid = ParameterGrid::new(&CurveFamily::Line, 10, 10).unwrap();
        assert_eq!(grid.cell_of(f64::NAN, f64::NAN), None);
        assert_eq!(grid.cell_of(0.0, f64::NAN), None);
        assert_eq!(grid.axis_a().index_of(f64::INFINITY), None);
        assert_eq!(grid.cell_of(0.0, 5.0).map(|(ia, _)| ia), Some(0));
    }

    #[test]
    fn fractional_radius_respaces_the_center_axis() {
        let grid = ParameterGrid::new(&CurveFamily::circle(0.3), 10, 10).unwrap();
        let axis = grid.axis_a();
        assert_eq!(axis.len(), 12);
        assert_eq!(axis.min(), -0.3);
        assert_eq!(axis.max(), 10.0 + 0.3);
        assert_relative_eq!(axis.step(), 10.6 / 11.0, epsilon = 1e-12);
    }

}
