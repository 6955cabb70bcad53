// THEORY:
// The `accumulator` module is the voting engine itself. Every input point casts a
// weighted vote into every cell of the parameter grid, and the votes add up into a
// dense `AccumulatorField` whose ridges and peaks mark likely shape instances.
//
// Key architectural principles:
// 1.  **Dense Evaluation**: There is no pruning or spatial indexing. For each point the
//     whole grid is evaluated, cell by cell, in row-major order (axis A outer, axis B
//     inner). The cost is O(points x cells) by construction.
// 2.  **Fixed Accumulation Order**: Points are folded in input order, and the whole grid
//     is updated for one point before the next is touched. Given the same inputs the
//     field is reproduced bit for bit.
// 3.  **Row Hoisting**: Terms that only depend on the axis-A sample (the line's
//     cos/sin, the circle's x offset) are computed once per row. The arithmetic per
//     cell is the same expression `CurveFamily::residual` evaluates, so the hoisting
//     never changes a single bit of the result.
// 4.  **Ownership**: An `Accumulator` owns its field while it is being built. `finish`
//     consumes it, and from then on the `AccumulatorField` is read-only.

use crate::core_modules::curve_family::CurveFamily;
use crate::core_modules::parameter_grid::ParameterGrid;
use crate::core_modules::point::point::Point;
use crate::core_modules::voting_policy::VotingPolicy;
use crate::error::InvalidInput;
use log::debug;
use std::time::Instant;

/// Dense, row-major vote field over a parameter grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatorField {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl AccumulatorField {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// `(|A|, |B|)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of cell `(i_a, i_b)`.
    pub fn get(&self, i_a: usize, i_b: usize) -> Option<f64> {
        if i_a >= self.rows || i_b >= self.cols {
            return None;
        }
        Some(self.values[i_a * self.cols + i_b])
    }

    /// All cells sharing the axis-A sample `i_a`.
    pub fn row(&self, i_a: usize) -> Option<&[f64]> {
        if i_a >= self.rows {
            return None;
        }
        Some(&self.values[i_a * self.cols..(i_a + 1) * self.cols])
    }

    /// Flat row-major view of the whole field.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Cell holding the largest value; the first one in row-major order on ties.
    pub fn argmax(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            match best {
                Some((_, best_v)) if v <= best_v => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| (i / self.cols, i % self.cols))
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Adds `other` cell by cell. Used to reduce partial fields.
    pub(crate) fn add_assign(&mut self, other: &AccumulatorField) {
        debug_assert_eq!(self.shape(), other.shape());
        for (dst, src) in self.values.iter_mut().zip(&other.values) {
            *dst += *src;
        }
    }
}

/// Terms that depend only on the axis-A sample, computed once per grid.
#[derive(Debug, Clone)]
enum RowTerms {
    /// `(cos(theta), sin(theta))` per theta sample.
    Line(Vec<(f64, f64)>),
    /// Axis-A samples are the center x coordinates themselves.
    Circle { radius: f64 },
}

impl RowTerms {
    fn new(family: &CurveFamily, grid: &ParameterGrid) -> Self {
        match *family {
            CurveFamily::Line => RowTerms::Line(
                grid.axis_a()
                    .samples()
                    .iter()
                    .map(|&a| {
                        let theta = a * std::f64::consts::PI / 180.0;
                        (theta.cos(), theta.sin())
                    })
                    .collect(),
            ),
            CurveFamily::Circle { radius } => RowTerms::Circle { radius },
        }
    }
}

/// Incremental fold of points into a field.
///
/// Each call to `fold_point` adds one point's votes to every cell.
pub struct Accumulator<'a> {
    grid: &'a ParameterGrid,
    policy: &'a VotingPolicy,
    terms: RowTerms,
    field: AccumulatorField,
    points_folded: usize,
}

impl<'a> Accumulator<'a> {
    pub fn new(grid: &'a ParameterGrid, family: &CurveFamily, policy: &'a VotingPolicy) -> Self {
        let (rows, cols) = grid.shape();
        Self {
            grid,
            policy,
            terms: RowTerms::new(family, grid),
            field: AccumulatorField::zeros(rows, cols),
            points_folded: 0,
        }
    }

    /// Adds the votes of `point` to every cell of the grid.
    pub fn fold_point(&mut self, point: &Point) {
        let grid = self.grid;
        let policy = self.policy;
        let b_samples = grid.axis_b().samples();
        let cols = b_samples.len();

        match &self.terms {
            RowTerms::Line(trig) => {
                for (row, &(cos, sin)) in self.field.values.chunks_mut(cols).zip(trig) {
                    let xc = point.x * cos;
                    let ys = point.y * sin;
                    for (cell, &r) in row.iter_mut().zip(b_samples) {
                        *cell += policy.weight((r - xc - ys).abs());
                    }
                }
            }
            RowTerms::Circle { radius } => {
                let a_samples = grid.axis_a().samples();
                for (row, &x_c) in self.field.values.chunks_mut(cols).zip(a_samples) {
                    let dx = x_c - point.x;
                    let dx2 = dx * dx;
                    for (cell, &y_c) in row.iter_mut().zip(b_samples) {
                        let dy = y_c - point.y;
                        *cell += policy.weight((radius - (dx2 + dy * dy).sqrt()).abs());
                    }
                }
            }
        }
        self.points_folded += 1;
    }

    pub fn points_folded(&self) -> usize {
        self.points_folded
    }

    /// Read-only view of the field built so far.
    pub fn field(&self) -> &AccumulatorField {
        &self.field
    }

    pub fn finish(self) -> AccumulatorField {
        self.field
    }
}

/// Accumulates the votes of all `points` over `grid`.
///
/// Points are folded in order; the whole grid is updated for one point before the
/// next. Fails fast on an empty point set, a degenerate grid or a bad tolerance.
pub fn accumulate(
    points: &[Point],
    grid: &ParameterGrid,
    family: &CurveFamily,
    policy: &VotingPolicy,
) -> Result<AccumulatorField, InvalidInput> {
    if points.is_empty() {
        return Err(InvalidInput::EmptyPoints);
    }
    grid.validate()?;
    family.validate()?;
    policy.validate()?;

    let t0 = Instant::now();
    let mut acc = Accumulator::new(grid, family, policy);
    for point in points {
        acc.fold_point(point);
    }
    let field = acc.finish();

    let (rows, cols) = field.shape();
    debug!(
        "accumulate: {} points into {} {}x{} grid in {:.2} ms (max={:.3})",
        points.len(),
        family.name(),
        rows,
        cols,
        t0.elapsed().as_secs_f64() * 1000.0,
        field.max()
    );
    Ok(field)
}

/// The field produced by a single point on its own.
pub fn single_point_field(
    point: &Point,
    grid: &ParameterGrid,
    family: &CurveFamily,
    policy: &VotingPolicy,
) -> Result<AccumulatorField, InvalidInput> {
    accumulate(std::slice::from_ref(point), grid, family, policy)
}
