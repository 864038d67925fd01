use sim_core::{Building, CashLedger};
use sim_econ::electricity_cost;

/// Monthly building costs: the lease of leased buildings and electricity of
/// every occupied one.
pub fn run_building_step(building: &Building, ledger: &mut CashLedger) {
    if building.leased {
        ledger.add("Building lease cost", -building.leasing_cost);
    }
    if building.is_occupied() {
        ledger.add("Utility Cost, Electricity", -electricity_cost(building));
    }
}
