// THEORY:
// The `pipeline` module is the top-level API for the voting engine. It wraps the
// curve family, the parameter grid and the voting policy into one easy-to-use
// object, so callers hand it a point set and get back a complete report.
//
// The pipeline validates its configuration once, builds the grid once, and can then
// be run against any number of point sets for the same image size. Each run owns
// its own field; nothing is shared between runs.

use crate::config::HoughConfig;
use crate::core_modules::accumulator::{self, AccumulatorField};
use crate::core_modules::parameter_grid::ParameterGrid;
use crate::core_modules::voting_policy::VotingPolicy;
use crate::error::{InvalidInput, Result};
use log::info;
use std::sync::Arc;

// Re-export key data structures for the public API.
pub use crate::core_modules::curve_family::CurveFamily;
pub use crate::core_modules::point::point::Point;

/// The strongest cell of a field, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSummary {
    pub index: (usize, usize),
    pub params: (f64, f64),
    pub value: f64,
}

/// The output of one accumulation run: the field plus both axes it is laid over.
#[derive(Debug, Clone)]
pub struct HoughReport {
    pub family: CurveFamily,
    pub grid: Arc<ParameterGrid>,
    pub field: AccumulatorField,
    /// Number of points that voted.
    pub point_count: usize,
}

impl HoughReport {
    /// Axis-A samples (theta in degrees, or x_c).
    pub fn axis_a(&self) -> &[f64] {
        self.grid.axis_a().samples()
    }

    /// Axis-B samples (r, or y_c).
    pub fn axis_b(&self) -> &[f64] {
        self.grid.axis_b().samples()
    }

    /// Field value at the cell nearest to `(a, b)`.
    pub fn value_at(&self, a: f64, b: f64) -> Option<f64> {
        let (ia, ib) = self.grid.cell_of(a, b)?;
        self.field.get(ia, ib)
    }

    pub fn strongest_cell(&self) -> Option<CellSummary> {
        let index = self.field.argmax()?;
        Some(CellSummary {
            index,
            params: self.grid.params(index.0, index.1)?,
            value: self.field.get(index.0, index.1)?,
        })
    }
}

/// The main, top-level struct for the voting engine.
#[derive(Debug, Clone)]
pub struct HoughPipeline {
    config: HoughConfig,
    grid: Arc<ParameterGrid>,
    policy: VotingPolicy,
}

impl HoughPipeline {
    pub fn new(config: HoughConfig) -> Result<Self> {
        config.validate()?;
        let grid = ParameterGrid::new(&config.family, config.image_height, config.image_width)?;
        let policy = VotingPolicy::new(config.tolerance)?;
        let (rows, cols) = grid.shape();
        let (name_a, name_b) = config.family.axis_names();
        info!(
            "{} pipeline for {}x{} image: {}x{} grid over ({}, {}), tolerance {}",
            config.family.name(),
            config.image_width,
            config.image_height,
            rows,
            cols,
            name_a,
            name_b,
            policy.tolerance()
        );
        Ok(Self {
            config,
            grid: Arc::new(grid),
            policy,
        })
    }

    pub fn config(&self) -> &HoughConfig {
        &self.config
    }

    pub fn family(&self) -> &CurveFamily {
        &self.config.family
    }

    pub fn grid(&self) -> &Arc<ParameterGrid> {
        &self.grid
    }

    pub fn policy(&self) -> &VotingPolicy {
        &self.policy
    }

    /// Accumulates every point into a fresh field.
    pub fn run(&self, points: &[Point]) -> Result<HoughReport> {
        let field = accumulator::accumulate(points, &self.grid, &self.config.family, &self.policy)?;
        Ok(self.report(field, points.len()))
    }

    /// The field of a single point on its own.
    pub fn single_point(&self, point: &Point) -> Result<HoughReport> {
        self.run(std::slice::from_ref(point))
    }

    pub(crate) fn report(&self, field: AccumulatorField, point_count: usize) -> HoughReport {
        HoughReport {
            family: self.config.family,
            grid: Arc::clone(&self.grid),
            field,
            point_count,
        }
    }

    pub(crate) fn check_points(points: &[Point]) -> std::result::Result<(), InvalidInput> {
        if points.is_empty() {
            return Err(InvalidInput::EmptyPoints);
        }
        Ok(())
    }
}
