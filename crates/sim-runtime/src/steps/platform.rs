use crate::error::StepError;
use sim_core::{CashLedger, NewsKind, NewsLog, Platform, SimTime};
use sim_econ::units_sold_at;
use tracing::info;

/// Daily platform update: installed base from the unit series and the
/// one-time release and discontinue transitions, each announced once.
pub fn run_platform_step(platform: &mut Platform, now: SimTime, news: &mut NewsLog) -> Result<(), StepError> {
    refresh_units_sold(platform, now);
    if !platform.released && now >= platform.release_date {
        platform.released = true;
        news.publish(&platform.name, platform.release_date, NewsKind::ProductReleased);
        info!(platform = %platform.id, "platform released");
    }
    if !platform.discontinued && now >= platform.discontinue_date {
        platform.discontinued = true;
        news.publish(&platform.name, platform.discontinue_date, NewsKind::ProductDiscontinued);
        info!(platform = %platform.id, "platform discontinued");
    }
    Ok(())
}

/// Installed base at `now`, floored to whole units.
pub fn refresh_units_sold(platform: &mut Platform, now: SimTime) {
    let units = units_sold_at(&platform.units, now);
    platform.units_sold = if units.is_finite() && units > 0.0 {
        units.floor() as u64
    } else {
        0
    };
}

/// Yearly license fee for platforms the studio holds a license for.
pub fn charge_license(platform: &Platform, ledger: &mut CashLedger) {
    if platform.license.bought && !platform.discontinued {
        ledger.add(format!("{} License", platform.name), -platform.license.cost_per_year);
    }
}
