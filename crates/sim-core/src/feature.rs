//! Researchable features shared by game and hardware projects.

use crate::ids::FeatureId;
use crate::staff::JobTitle;
use serde::{Deserialize, Serialize};

/// Platform capabilities a feature needs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    pub processing: f64,
    pub graphics: f64,
    pub storage: f64,
    pub memory: f64,
}

impl Requirements {
    /// Requirements scaled by a game-size multiplier.
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            processing: self.processing * multiplier,
            graphics: self.graphics * multiplier,
            storage: self.storage * multiplier,
            memory: self.memory * multiplier,
        }
    }
}

/// A unit of content that can be researched and then built into projects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    /// Stable tag referenced by other features' dependencies.
    pub tag: String,
    pub name: String,
    pub category: String,
    /// Progress thresholds per quality level, ascending, unscaled by game size.
    pub point_scale: Vec<f64>,
    pub required_skills: Vec<JobTitle>,
    pub required_points_to_unlock: f64,
    pub researched_points: f64,
    pub researching: bool,
    /// Tags of features that must be researched first.
    pub dependencies: Vec<String>,
    pub requirements: Requirements,
}

impl Feature {
    pub fn is_researched(&self) -> bool {
        self.researched_points >= self.required_points_to_unlock
    }

    /// Mark the feature as under research; returns false when already researched.
    pub fn begin_research(&mut self) -> bool {
        if self.is_researched() {
            return false;
        }
        self.researching = true;
        true
    }

    /// Threshold of level `index` (0-based), 0 when the scale is shorter.
    pub fn threshold(&self, index: usize) -> f64 {
        self.point_scale.get(index).copied().unwrap_or(0.0)
    }
}
