//! Exact-decimal summary aggregation over ledger entries.

use rust_decimal::Decimal;
use serde::Serialize;

use super::EntryType;

/// Aggregate statistics over a set of ledger entries.
///
/// All sums are computed with `Decimal`, never binary floating point, so
/// cent-level amounts survive aggregation bit-exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Total inflow amount.
    pub total_masuk: Decimal,
    /// Total outflow amount.
    pub total_keluar: Decimal,
    /// Net balance: inflow minus outflow.
    pub saldo: Decimal,
    /// Number of inflow entries.
    pub count_masuk: u64,
    /// Number of outflow entries.
    pub count_keluar: u64,
}

impl Summary {
    /// The all-zero summary. An empty entry set aggregates to this, never to
    /// an error.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            total_masuk: Decimal::ZERO,
            total_keluar: Decimal::ZERO,
            saldo: Decimal::ZERO,
            count_masuk: 0,
            count_keluar: 0,
        }
    }

    /// Folds `(type, amount)` pairs into aggregate totals.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (EntryType, Decimal)>,
    {
        let mut summary = Self::zero();
        for (tipe, jumlah) in entries {
            match tipe {
                EntryType::Masuk => {
                    summary.total_masuk += jumlah;
                    summary.count_masuk += 1;
                }
                EntryType::Keluar => {
                    summary.total_keluar += jumlah;
                    summary.count_keluar += 1;
                }
            }
        }
        summary.saldo = summary.total_masuk - summary.total_keluar;
        summary
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_entry_set_is_all_zero() {
        let summary = Summary::from_entries(std::iter::empty());
        assert_eq!(summary, Summary::zero());
    }

    #[test]
    fn test_one_inflow_one_outflow() {
        let summary = Summary::from_entries([
            (EntryType::Masuk, dec!(100.50)),
            (EntryType::Keluar, dec!(30.25)),
        ]);

        assert_eq!(summary.total_masuk, dec!(100.50));
        assert_eq!(summary.total_keluar, dec!(30.25));
        assert_eq!(summary.saldo, dec!(70.25));
        assert_eq!(summary.count_masuk, 1);
        assert_eq!(summary.count_keluar, 1);
    }

    #[test]
    fn test_saldo_can_be_negative() {
        let summary = Summary::from_entries([
            (EntryType::Masuk, dec!(10.00)),
            (EntryType::Keluar, dec!(25.00)),
        ]);
        assert_eq!(summary.saldo, dec!(-15.00));
    }

    #[test]
    fn test_cent_amounts_do_not_drift() {
        // 0.1 + 0.2 is the classic binary-float failure.
        let summary = Summary::from_entries([
            (EntryType::Masuk, dec!(0.10)),
            (EntryType::Masuk, dec!(0.20)),
        ]);
        assert_eq!(summary.total_masuk, dec!(0.30));
        assert_eq!(summary.count_masuk, 2);
    }
}
