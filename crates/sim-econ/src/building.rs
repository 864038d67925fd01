//! Building floor area and running costs.

use rust_decimal::Decimal;
use sim_core::Building;

/// Monthly electricity price per rentable square metre.
pub const ELECTRICITY_COST_PER_SQM: i64 = 3;

/// Rentable area: office space plus 40% circulation plus a 20% load factor.
pub fn rentable_square_meters(building: &Building) -> f64 {
    let office: f64 = building
        .spaces
        .iter()
        .map(|s| s.size * f64::from(s.quantity))
        .sum();
    let circulation = office * 0.4;
    let load_factor = (office + circulation) * 0.2;
    (office + circulation + load_factor).floor()
}

/// Monthly electricity bill of an occupied building.
pub fn electricity_cost(building: &Building) -> Decimal {
    let sqm = rentable_square_meters(building) as i64;
    Decimal::from(ELECTRICITY_COST_PER_SQM * sqm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{BuildingId, BuildingKind, PropertyState, PropertyType, Space};

    #[test]
    fn rentable_area_includes_circulation_and_load() {
        let b = Building {
            id: BuildingId::new("b"),
            kind: BuildingKind::Studio,
            location: "Sunnyvale".into(),
            state: PropertyState::Lease,
            property_type: PropertyType::Office,
            leasing_cost: Decimal::new(1000, 0),
            buying_cost: Decimal::ZERO,
            bought: false,
            leased: true,
            lease_duration: 12,
            spaces: vec![Space { kind: "desk".into(), size: 10.0, quantity: 10 }],
        };
        // 100 + 40 + 28
        assert_eq!(rentable_square_meters(&b), 168.0);
        assert_eq!(electricity_cost(&b), Decimal::new(504, 0));
    }
}
