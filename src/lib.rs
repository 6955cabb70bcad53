// THEORY:
// This file is the main entry point for the `hough_vision` library crate. It exports
// the `HoughPipeline` and its associated data structures (`HoughConfig`,
// `HoughReport`, etc.) as the high-level interface to the voting engine, while the
// building blocks live in `core_modules`:
//
// - `point`:          the edge evidence, plain pixel coordinates.
// - `curve_family`:   lines and fixed-radius circles, and their residuals.
// - `parameter_grid`: the discretized parameter space.
// - `voting_policy`:  residual to vote-weight conversion.
// - `accumulator`:    the dense voting engine and its field.
// - `viewport`:       clipping a detected line to a rectangle for rendering.
// - `utils`:          raster adapters at the crate boundary.
//
// Raster acquisition, edge detection and plotting are left to the caller.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use config::{HoughConfig, load_config};
pub use core_modules::accumulator::{Accumulator, AccumulatorField, accumulate, single_point_field};
pub use core_modules::curve_family::CurveFamily;
pub use core_modules::parameter_grid::{Axis, ParameterGrid};
pub use core_modules::point::point::Point;
pub use core_modules::viewport::{Segment, clip_line_to_viewport};
pub use core_modules::voting_policy::VotingPolicy;
pub use error::{Error, InvalidInput, Result};
pub use parallel_pipeline::{ParallelAccumulator, ParallelPipeline};
pub use pipeline::{HoughPipeline, HoughReport};
