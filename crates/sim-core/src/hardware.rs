//! Hardware development projects.

use crate::ids::{CompanyId, FeatureId, HardwareId, TeamId};
use serde::{Deserialize, Serialize};

/// Progress above which a design enters production.
pub const PRODUCTION_THRESHOLD: f64 = 10.0;

/// Hardware project lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HardwarePhase {
    Design,
    Production,
    ProductionTest,
    Release,
}

impl HardwarePhase {
    /// Next phase, `None` after release.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Design => Some(Self::Production),
            Self::Production => Some(Self::ProductionTest),
            Self::ProductionTest => Some(Self::Release),
            Self::Release => None,
        }
    }
}

/// Clock-speed range in MHz.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClockSpeed {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HardwareProject {
    pub id: HardwareId,
    pub name: String,
    pub team_id: TeamId,
    pub progress: f64,
    pub developer_id: CompanyId,
    pub phase: HardwarePhase,
    pub feature_ids: Vec<FeatureId>,
    pub clock_speed: ClockSpeed,
    pub manufacturer_id: Option<CompanyId>,
}

impl HardwareProject {
    pub fn new(id: HardwareId, name: impl Into<String>, team_id: TeamId, developer_id: CompanyId) -> Self {
        Self {
            id,
            name: name.into(),
            team_id,
            progress: 0.0,
            developer_id,
            phase: HardwarePhase::Design,
            feature_ids: Vec::new(),
            clock_speed: ClockSpeed::default(),
            manufacturer_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_in_order() {
        let mut phase = HardwarePhase::Design;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            assert!(next > phase);
            phase = next;
            seen.push(phase);
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(phase, HardwarePhase::Release);
    }
}
