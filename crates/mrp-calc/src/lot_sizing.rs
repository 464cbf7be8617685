//! 批量規則實現

use mrp_core::Item;
use rust_decimal::Decimal;

/// 批量規則計算器
///
/// 訂購量一律為 `最小批量 + 批量增量 × k`（k ≥ 0），且不小於不足量。
pub struct LotSizingCalculator;

impl LotSizingCalculator {
    /// 依品目的批量參數調整訂購量；數值溢位時返回 `None`
    pub fn for_item(item: &Item, shortage: Decimal) -> Option<Decimal> {
        Self::order_quantity(shortage, item.min_lot_size_qty(), item.lot_increment_qty())
    }

    /// 計算訂購量（無條件進位）
    ///
    /// * 不足量 ≤ 最小批量：訂購最小批量
    /// * 否則：最小批量 + 增量 × ceil((不足量 − 最小批量) / 增量)
    ///
    /// 呼叫端需保證 `min_lot_size` 與 `lot_increment` 大於 0。
    /// 任一步驟超出 `Decimal` 範圍時返回 `None`。
    pub fn order_quantity(
        shortage: Decimal,
        min_lot_size: Decimal,
        lot_increment: Decimal,
    ) -> Option<Decimal> {
        if shortage <= min_lot_size {
            return Some(min_lot_size);
        }

        let excess = shortage.checked_sub(min_lot_size)?;
        let increments = excess.checked_div(lot_increment)?.ceil();
        let quantity = lot_increment
            .checked_mul(increments)?
            .checked_add(min_lot_size)?;

        // 除法結果可能被截斷到 28 位小數，進位後仍不足時補一個增量
        if quantity < shortage {
            quantity.checked_add(lot_increment)
        } else {
            Some(quantity)
        }
    }
}
