use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Pivot-ordering policy. Controls how the pivot manager sorts candidate
/// origin points before trying them in order (see [`crate::pivot`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadPattern {
    /// Fill along the width first at floor level, then stack by height.
    Side,
    /// Alias of `Side`.
    Default,
    /// Fill along the length first.
    Back,
    /// Alias of `Back`.
    RearLoading,
    /// Bias toward spreading at floor level before stacking.
    UniformDist,
}

impl FromStr for LoadPattern {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Side" => Ok(Self::Side),
            "Default" => Ok(Self::Default),
            "Back" => Ok(Self::Back),
            "Rear Loading" => Ok(Self::RearLoading),
            "Uniform Dist." => Ok(Self::UniformDist),
            other => match other.to_ascii_lowercase().as_str() {
                "side" => Ok(Self::Side),
                "default" => Ok(Self::Default),
                "back" => Ok(Self::Back),
                "rear_loading" | "rearloading" | "rear-loading" => Ok(Self::RearLoading),
                "uniform_dist" | "uniformdist" | "uniform-dist" | "uniform dist." => {
                    Ok(Self::UniformDist)
                }
                _ => Err(()),
            },
        }
    }
}

impl LoadPattern {
    /// True for the patterns that use the "Back"/"Rear Loading" sort family
    /// (both in pivot ordering and in the input normalizer).
    pub fn is_rear_loading(self) -> bool {
        matches!(self, Self::Back | Self::RearLoading)
    }
}

/// Packing configuration: the threshold and policy knobs the engine is a
/// pure function of.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Minimum required base-support percentage for a placement, in [0,100].
    #[serde(default = "default_base_area_threshold")]
    pub base_area_threshold: f64,
    /// Pivot-ordering / normalizer-sort policy.
    #[serde(default = "default_load_pattern")]
    pub load_pattern: LoadPattern,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            base_area_threshold: default_base_area_threshold(),
            load_pattern: default_load_pattern(),
        }
    }
}

fn default_base_area_threshold() -> f64 {
    100.0
}

fn default_load_pattern() -> LoadPattern {
    LoadPattern::Side
}

impl PackerConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::CargoPackError;
        if !(0.0..=100.0).contains(&self.base_area_threshold) {
            return Err(CargoPackError::InvalidConfig(format!(
                "base_area_threshold must be in [0,100], got {}",
                self.base_area_threshold
            )));
        }
        Ok(())
    }
}

/// Builder for [`PackerConfig`] for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn base_area_threshold(mut self, v: f64) -> Self {
        self.cfg.base_area_threshold = v;
        self
    }
    pub fn load_pattern(mut self, v: LoadPattern) -> Self {
        self.cfg.load_pattern = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

impl PackerConfig {
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}
