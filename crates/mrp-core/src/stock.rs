//! 庫存快照模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{MrpError, Result};

/// 單一場所的庫存快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    /// 品目代碼
    pub item_code: String,

    /// 場所（倉庫/儲位）
    pub location: String,

    /// 現有庫存
    pub on_hand: Decimal,
}

impl StockSnapshot {
    /// 創建新的庫存快照
    pub fn new(item_code: impl Into<String>, location: impl Into<String>, on_hand: Decimal) -> Self {
        Self {
            item_code: item_code.into(),
            location: location.into(),
            on_hand,
        }
    }
}

/// 依品目彙總各場所的現有庫存
///
/// 合計超出 `Decimal` 範圍時返回 `CalculationError`。
pub fn aggregate_on_hand(snapshots: &[StockSnapshot]) -> Result<BTreeMap<String, Decimal>> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for snapshot in snapshots {
        let total = totals.entry(snapshot.item_code.clone()).or_insert(Decimal::ZERO);
        *total = total.checked_add(snapshot.on_hand).ok_or_else(|| {
            MrpError::CalculationError(format!("品目 {} 的庫存合計溢位", snapshot.item_code))
        })?;
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_across_locations() {
        let snapshots = vec![
            StockSnapshot::new("PART-001", "WH-01", Decimal::from(30)),
            StockSnapshot::new("PART-001", "WH-02", Decimal::from(10)),
            StockSnapshot::new("MAT-001", "WH-01", Decimal::new(125, 1)),
        ];

        let totals = aggregate_on_hand(&snapshots).unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["PART-001"], Decimal::from(40));
        assert_eq!(totals["MAT-001"], Decimal::new(125, 1));
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_on_hand(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_negative_balance_is_summed() {
        // 帳上負庫存照樣加總，不做修正
        let snapshots = vec![
            StockSnapshot::new("PART-002", "WH-01", Decimal::from(-5)),
            StockSnapshot::new("PART-002", "WH-02", Decimal::from(20)),
        ];
        assert_eq!(aggregate_on_hand(&snapshots).unwrap()["PART-002"], Decimal::from(15));
    }

    #[test]
    fn test_aggregate_overflow_is_an_error() {
        let snapshots = vec![
            StockSnapshot::new("A", "WH-01", Decimal::MAX),
            StockSnapshot::new("A", "WH-02", Decimal::MAX),
        ];

        let err = aggregate_on_hand(&snapshots).unwrap_err();
        assert!(matches!(err, MrpError::CalculationError(ref msg) if msg.contains("A")));
    }

    #[test]
    fn test_offsetting_rows_near_limit() {
        let snapshots = vec![
            StockSnapshot::new("A", "WH-01", Decimal::MAX),
            StockSnapshot::new("A", "WH-02", Decimal::from(-1)),
        ];
        assert_eq!(aggregate_on_hand(&snapshots).unwrap()["A"], Decimal::MAX - Decimal::ONE);
    }
}
