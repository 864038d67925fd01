use sim_core::{CashLedger, Team};

/// Daily rest: every employee wakes up with full energy.
pub fn rest_team(team: &mut Team) {
    for e in &mut team.employees {
        e.rest();
    }
}

/// Monthly salaries of one team.
pub fn pay_salaries(team: &Team, ledger: &mut CashLedger) {
    let total = team.payroll();
    if !total.is_zero() {
        ledger.add(format!("Salaries, {}", team.name), -total);
    }
}
