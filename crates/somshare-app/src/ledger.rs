//! Points ledger view: balance plus history, partitioned into earned
//! and spent by transaction type.

use somshare_client::{ApiClient, ApiError};
use somshare_types::api::HistoryKind;
use somshare_types::models::PointTransaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    /// Sum of EARN amounts (positive).
    pub earned: i64,
    /// Magnitude of CHARGE/USE amounts (positive number of points spent).
    pub spent: i64,
}

/// Partition entries by type. Amounts on spend entries arrive signed;
/// the total reports their magnitude.
pub fn partition_totals(entries: &[PointTransaction]) -> LedgerTotals {
    let mut totals = LedgerTotals::default();
    for tx in entries {
        if tx.kind.is_earn() {
            totals.earned += tx.amount;
        } else {
            totals.spent += tx.amount.abs();
        }
    }
    totals
}

#[derive(Default)]
pub struct LedgerView {
    pub balance: i64,
    pub entries: Vec<PointTransaction>,
}

impl LedgerView {
    /// Fetch balance and one history page. Both are server truth; the
    /// view never recomputes the balance from the entries.
    pub async fn refresh(
        &mut self,
        client: &ApiClient,
        kind: HistoryKind,
        page: u32,
        size: u32,
    ) -> Result<(), ApiError> {
        let balance = client.point_balance().await?;
        let history = client.point_history(kind, page, size).await?;
        self.balance = balance;
        self.entries = history.content;
        Ok(())
    }

    pub fn totals(&self) -> LedgerTotals {
        partition_totals(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: i64, kind: &str) -> PointTransaction {
        serde_json::from_str(&format!(
            r#"{{"id":1,"amount":{},"type":"{}","description":"테스트","createdAt":"2024-10-15T09:30:00Z"}}"#,
            amount, kind
        ))
        .unwrap()
    }

    #[test]
    fn totals_partition_by_transaction_type() {
        let entries = vec![
            tx(100, "EARN"),
            tx(100, "EARN"),
            tx(-50, "USE"),
            tx(-30, "CHARGE"),
        ];
        let totals = partition_totals(&entries);
        assert_eq!(totals.earned, 200);
        assert_eq!(totals.spent, 80);
    }

    #[test]
    fn empty_history_partitions_to_zero() {
        assert_eq!(partition_totals(&[]), LedgerTotals::default());
    }
}
