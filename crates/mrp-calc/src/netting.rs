//! 淨需求計算

use chrono::NaiveDate;
use mrp_core::{Item, MrpError, PlannedOrder, PlannedOrderType, Result, ShortageItem};
use rust_decimal::Decimal;

use crate::lead_time::LeadTimeCalculator;
use crate::lot_sizing::LotSizingCalculator;
use crate::MrpWarning;

/// 單品目淨需求結果
///
/// 缺料記錄與計劃訂單同時產生，兩者並不互斥。
#[derive(Debug, Clone, PartialEq)]
pub struct NettingOutcome {
    pub planned_order: PlannedOrder,
    pub shortage: ShortageItem,
    pub warnings: Vec<MrpWarning>,
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 計算單一品目的淨需求
    ///
    /// 不足量 = 安全庫存 − 現有庫存；不足量 ≤ 0 時返回 `Ok(None)`。
    /// 主檔數值缺漏時套用預設值；只有數量超出 `Decimal` 範圍時
    /// 返回 `CalculationError`。
    pub fn net_item(
        item: &Item,
        on_hand: Decimal,
        horizon_start: NaiveDate,
    ) -> Result<Option<NettingOutcome>> {
        let overflow = || {
            MrpError::CalculationError(format!("品目 {} 的數量超出計算範圍", item.item_code))
        };

        let shortage_quantity = item
            .safety_stock_qty()
            .checked_sub(on_hand)
            .ok_or_else(overflow)?;
        if shortage_quantity <= Decimal::ZERO {
            return Ok(None);
        }

        let mut warnings = Vec::new();
        if item.has_invalid_lot_parameters() {
            tracing::warn!(
                "品目 {} 批量參數非正數（最小批量: {:?}, 增量: {:?}），改用 1",
                item.item_code,
                item.min_lot_size,
                item.lot_increment
            );
            warnings.push(MrpWarning::warning(
                item.item_code.clone(),
                "最小批量或批量增量非正數，已改用 1".to_string(),
            ));
        }

        let order_type = PlannedOrderType::from(item.procurement_type());
        let quantity =
            LotSizingCalculator::for_item(item, shortage_quantity).ok_or_else(overflow)?;

        if let Some(max_lot_size) = item.max_lot_size {
            if quantity > max_lot_size {
                warnings.push(MrpWarning::warning(
                    item.item_code.clone(),
                    format!("計劃數量 {} 超過最大批量 {}", quantity, max_lot_size),
                ));
            }
        }

        tracing::debug!(
            "品目 {} 不足 {} → {:?} {}",
            item.item_code,
            shortage_quantity,
            order_type,
            quantity
        );

        let planned_order = PlannedOrder::new(
            item.item_code.clone(),
            item.item_name.clone(),
            order_type,
            quantity,
            LeadTimeCalculator::due_date(item, horizon_start),
        )
        .with_lead_times(item.lead_time_days(), item.safety_lead_time_days());

        let shortage = ShortageItem::new(
            item.item_code.clone(),
            item.item_name.clone(),
            shortage_quantity,
            LeadTimeCalculator::recommended_order_date(item, horizon_start),
        );

        Ok(Some(NettingOutcome {
            planned_order,
            shortage,
            warnings,
        }))
    }
}
