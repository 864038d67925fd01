//! Cash ledger: signed, labelled entries with a running total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One signed ledger movement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Human-readable reason, e.g. a game name or "Advertising".
    pub label: String,
    /// Credit (> 0) or debit (< 0).
    pub amount: Decimal,
}

/// Studio cash account shared by every step function.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CashLedger {
    total: Decimal,
    entries: Vec<LedgerEntry>,
}

impl CashLedger {
    /// Ledger with an opening balance and no entries.
    pub fn with_balance(total: Decimal) -> Self {
        Self {
            total,
            entries: Vec::new(),
        }
    }

    /// Record a signed entry and update the running total.
    pub fn add(&mut self, label: impl Into<String>, amount: Decimal) {
        let label = label.into();
        debug!(%label, %amount, "ledger entry");
        self.total += amount;
        self.entries.push(LedgerEntry { label, amount });
    }

    /// Replace the balance and drop the entry history (used on save load).
    pub fn reset(&mut self, total: Decimal) {
        self.total = total;
        self.entries.clear();
    }

    /// Current balance.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Sum of all entries carrying `label`.
    pub fn sum_for(&self, label: &str) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.label == label)
            .map(|e| e.amount)
            .sum()
    }
}
