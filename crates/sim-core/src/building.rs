//! Offices and factories the studio leases or owns.

use crate::ids::BuildingId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Studio,
    Factory,
    Generic,
}

/// Whether the property is offered for lease or for sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyState {
    Lease,
    Buy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Office,
    Industrial,
    Retail,
    Land,
    MixedUse,
}

/// A group of identical rooms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub kind: String,
    /// Square metres per room.
    pub size: f64,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub kind: BuildingKind,
    pub location: String,
    pub state: PropertyState,
    pub property_type: PropertyType,
    /// Monthly lease.
    pub leasing_cost: Decimal,
    pub buying_cost: Decimal,
    pub bought: bool,
    pub leased: bool,
    /// Lease term in months.
    pub lease_duration: u32,
    pub spaces: Vec<Space>,
}

impl Building {
    /// Usable office area in square metres.
    pub fn office_space(&self) -> f64 {
        self.spaces
            .iter()
            .map(|s| s.size * f64::from(s.quantity))
            .sum::<f64>()
            .floor()
    }

    /// Number of workplaces.
    pub fn seats(&self) -> u32 {
        self.spaces.iter().map(|s| s.quantity).sum()
    }

    /// Currently occupied by the studio.
    pub fn is_occupied(&self) -> bool {
        self.bought || self.leased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn office_space_and_seats() {
        let b = Building {
            id: BuildingId::new("b"),
            kind: BuildingKind::Studio,
            location: "Sunnyvale".into(),
            state: PropertyState::Lease,
            property_type: PropertyType::Office,
            leasing_cost: Decimal::new(1500, 0),
            buying_cost: Decimal::new(250_000, 0),
            bought: false,
            leased: false,
            lease_duration: 12,
            spaces: vec![
                Space { kind: "desk".into(), size: 6.5, quantity: 4 },
                Space { kind: "meeting".into(), size: 20.0, quantity: 1 },
            ],
        };
        assert_eq!(b.office_space(), 46.0);
        assert_eq!(b.seats(), 5);
        assert!(!b.is_occupied());
    }
}
