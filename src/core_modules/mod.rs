pub mod accumulator;
pub mod curve_family;
pub mod parameter_grid;
pub mod point;
pub mod utils;
pub mod viewport;
pub mod voting_policy;
