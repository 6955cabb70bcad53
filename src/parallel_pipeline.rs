// THEORY:
// The `parallel_pipeline` spreads one accumulation run over a pool of workers. Votes
// from different points never interact, so the point sequence can be cut into
// contiguous slices and each slice folded into its own private partial field.
//
// Key architectural principles:
// 1.  **Private Partial Fields**: Every worker owns its `Accumulator`. No cell is ever
//     written by two workers, so there are no locks on the hot path.
// 2.  **Read-Only Sharing**: The points and the grid are immutable and shared through
//     `Arc`s. The family and the policy are small and copied into each worker.
// 3.  **Ordered Reduction**: Partial fields are summed one after another in slice
//     order, so a given worker count always reproduces the same field. With a single
//     slice the result is identical to the sequential engine.

use crate::core_modules::accumulator::{Accumulator, AccumulatorField};
use crate::core_modules::curve_family::CurveFamily;
use crate::core_modules::parameter_grid::ParameterGrid;
use crate::core_modules::point::point::Point;
use crate::core_modules::voting_policy::VotingPolicy;
use crate::error::{Error, Result};
use crate::pipeline::{HoughPipeline, HoughReport};
use futures::future::join_all;
use log::debug;
use std::sync::Arc;
use std::time::Instant;

/// A pool of blocking workers that accumulate disjoint slices of the point set.
#[derive(Debug, Clone)]
pub struct ParallelAccumulator {
    workers: usize,
}

impl ParallelAccumulator {
    /// `workers == 0` means one worker per logical CPU.
    pub fn new(workers: usize) -> Self {
        let workers = if workers == 0 { num_cpus::get() } else { workers };
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Contiguous `[start, end)` slices, at most one per worker.
    pub fn partition(&self, len: usize) -> Vec<(usize, usize)> {
        if len == 0 {
            return Vec::new();
        }
        let chunk = len.div_ceil(self.workers);
        (0..len)
            .step_by(chunk)
            .map(|start| (start, (start + chunk).min(len)))
            .collect()
    }

    pub async fn accumulate(
        &self,
        points: &[Point],
        grid: Arc<ParameterGrid>,
        family: CurveFamily,
        policy: VotingPolicy,
    ) -> Result<AccumulatorField> {
        HoughPipeline::check_points(points)?;
        grid.validate()?;
        family.validate()?;
        policy.validate()?;

        let t0 = Instant::now();
        let shared: Arc<[Point]> = Arc::from(points);
        let slices = self.partition(shared.len());

        let tasks = slices.iter().map(|&(start, end)| {
            let points = Arc::clone(&shared);
            let grid = Arc::clone(&grid);
            let policy = policy.clone();
            tokio::task::spawn_blocking(move || {
                let mut acc = Accumulator::new(&grid, &family, &policy);
                for point in &points[start..end] {
                    acc.fold_point(point);
                }
                acc.finish()
            })
        });

        let mut partials = join_all(tasks).await.into_iter();
        let mut field = match partials.next() {
            Some(first) => first.map_err(|e| Error::Worker(e.to_string()))?,
            None => return Err(Error::Worker("no worker produced a field".to_string())),
        };
        for partial in partials {
            let partial = partial.map_err(|e| Error::Worker(e.to_string()))?;
            field.add_assign(&partial);
        }

        debug!(
            "parallel accumulate: {} points over {} slices in {:.2} ms",
            points.len(),
            slices.len(),
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(field)
    }
}

/// A `HoughPipeline` whose runs are spread over a `ParallelAccumulator`.
pub struct ParallelPipeline {
    pipeline: HoughPipeline,
    pool: ParallelAccumulator,
}

impl ParallelPipeline {
    pub fn new(pipeline: HoughPipeline) -> Self {
        let pool = ParallelAccumulator::new(pipeline.config().workers);
        Self { pipeline, pool }
    }

    pub fn pipeline(&self) -> &HoughPipeline {
        &self.pipeline
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    pub async fn run(&self, points: &[Point]) -> Result<HoughReport> {
        let field = self
            .pool
            .accumulate(
                points,
                Arc::clone(self.pipeline.grid()),
                *self.pipeline.family(),
                self.pipeline.policy().clone(),
            )
            .await?;
        Ok(self.pipeline.report(field, points.len()))
    }
}
