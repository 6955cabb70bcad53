use crate::core_modules::curve_family::CurveFamily;
use crate::core_modules::utils::image_helper::image_helper::DEFAULT_LEVEL;
use crate::core_modules::voting_policy::{DEFAULT_TOLERANCE, VotingPolicy};
use crate::error::{Error, InvalidInput, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the HoughPipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Curve family to vote for, with its constants.
    pub family: CurveFamily,
    pub image_width: u32,
    pub image_height: u32,
    /// Residual at which a vote falls to zero, in grid units. Controls ridge thickness.
    pub tolerance: f64,
    /// Worker count for parallel accumulation. 0 uses one worker per CPU.
    pub workers: usize,
    /// Brightness that marks a raster pixel as an edge point.
    pub bright_level: u8,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            family: CurveFamily::Line,
            image_width: 0,
            image_height: 0,
            tolerance: DEFAULT_TOLERANCE,
            workers: 0,
            bright_level: DEFAULT_LEVEL,
        }
    }
}

impl HoughConfig {
    pub fn line(image_height: u32, image_width: u32) -> Self {
        Self {
            family: CurveFamily::Line,
            image_width,
            image_height,
            ..Self::default()
        }
    }

    pub fn circle(radius: f64, image_height: u32, image_width: u32) -> Self {
        Self {
            family: CurveFamily::circle(radius),
            image_width,
            image_height,
            ..Self::default()
        }
    }

    /// Checks everything the pipeline would otherwise reject later.
    pub fn validate(&self) -> std::result::Result<(), InvalidInput> {
        if self.image_height == 0 || self.image_width == 0 {
            return Err(InvalidInput::NonPositiveDimensions {
                height: self.image_height,
                width: self.image_width,
            });
        }
        self.family.validate()?;
        VotingPolicy::new(self.tolerance)?;
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<HoughConfig> {
    let data = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config {}: {e}", path.display())))?;
    parse_config(&data)
        .map_err(|e| Error::Config(format!("Failed to parse config {}: {e}", path.display())))
}

pub fn parse_config(data: &str) -> std::result::Result<HoughConfig, serde_json::Error> {
    serde_json::from_str(data)
}
