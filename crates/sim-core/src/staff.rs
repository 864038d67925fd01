//! Employees and teams.

use crate::ids::{CompanyId, EmployeeId, TeamId};
use crate::rng::SimRng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Starting and maximum energy of a freshly hired employee.
pub const DEFAULT_ENERGY: f64 = 10.0;

/// Job titles; game features list the titles whose experience applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JobTitle {
    Designer,
    Programmer,
    Artist,
    AudioEngineer,
    Producer,
    Director,
    Writer,
    HardwareEngineer,
}

impl JobTitle {
    pub const ALL: [JobTitle; 8] = [
        JobTitle::Designer,
        JobTitle::Programmer,
        JobTitle::Artist,
        JobTitle::AudioEngineer,
        JobTitle::Producer,
        JobTitle::Director,
        JobTitle::Writer,
        JobTitle::HardwareEngineer,
    ];

    /// Average monthly salary (USD) used when hiring.
    pub fn average_salary(self) -> Decimal {
        let v = match self {
            Self::Designer => 6000,
            Self::Programmer => 4000,
            Self::Artist => 5000,
            Self::AudioEngineer => 7000,
            Self::Producer => 5000,
            Self::Director => 7000,
            Self::Writer => 4400,
            Self::HardwareEngineer => 6500,
        };
        Decimal::new(v, 0)
    }
}

/// Experience level in one job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub job: JobTitle,
    pub xp: u32,
}

/// Productivity modifiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    /// Upper bound of the random base productivity roll (>= 1).
    pub productivity: u32,
    pub extra_productivity: u32,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            productivity: 1,
            extra_productivity: 0,
        }
    }
}

/// A studio employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub job: JobTitle,
    pub salary: Decimal,
    pub energy: f64,
    pub max_energy: f64,
    pub experience: Vec<Experience>,
    pub effects: Effects,
    pub is_player: bool,
}

impl Employee {
    /// Hire a new employee with randomised experience and a salary around the job average.
    pub fn generate(rng: &mut SimRng, job: JobTitle, name: impl Into<String>) -> Self {
        let experience = JobTitle::ALL
            .iter()
            .copied()
            .filter_map(|j| {
                if rng.chance(0.5) || j == job {
                    Some(Experience {
                        job: j,
                        xp: rng.range_int(1, 5) as u32,
                    })
                } else {
                    None
                }
            })
            .collect();
        let factor = Decimal::from_f64(rng.range(0.5, 1.5)).unwrap_or(Decimal::ONE);
        let salary = (job.average_salary() * factor).round();
        Self {
            id: EmployeeId::new(rng.unique_id()),
            name: name.into(),
            job,
            salary,
            energy: DEFAULT_ENERGY,
            max_energy: DEFAULT_ENERGY,
            experience,
            effects: Effects {
                productivity: rng.range_int(1, 2) as u32,
                extra_productivity: 0,
            },
            is_player: false,
        }
    }

    /// Experience in a specific job.
    pub fn xp_for(&self, job: JobTitle) -> Option<u32> {
        self.experience.iter().find(|e| e.job == job).map(|e| e.xp)
    }

    /// Highest experience among `skills`; 1 when the employee has none of them.
    pub fn best_xp_for(&self, skills: &[JobTitle]) -> u32 {
        self.experience
            .iter()
            .filter(|e| skills.contains(&e.job))
            .map(|e| e.xp)
            .max()
            .unwrap_or(1)
    }

    /// Likelihood factor of introducing bugs: grows as energy drops, capped at 100.
    pub fn fatigue(&self) -> i64 {
        let ratio = (self.max_energy / self.energy.max(0.1)).floor();
        (ratio as i64).clamp(0, 100)
    }

    /// Spend energy; never drops below zero.
    pub fn drain(&mut self, amount: f64) {
        self.energy = (self.energy - amount).max(0.0);
    }

    pub fn rest(&mut self) {
        self.energy = self.max_energy;
    }
}

/// What a team may work on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamKind {
    Dev,
    Research,
}

/// A group of employees owned by a company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub employees: Vec<Employee>,
    pub company_id: CompanyId,
    pub kinds: Vec<TeamKind>,
}

impl Team {
    pub fn is_research(&self) -> bool {
        self.kinds.contains(&TeamKind::Research)
    }

    /// Monthly salary total.
    pub fn payroll(&self) -> Decimal {
        self.employees.iter().map(|e| e.salary).sum()
    }
}
