//! 計劃訂單與缺料模型

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ProcurementType;

/// 計劃訂單類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlannedOrderType {
    /// 製造
    Manufacturing,
    /// 採購
    Purchase,
}

impl From<ProcurementType> for PlannedOrderType {
    fn from(procurement_type: ProcurementType) -> Self {
        match procurement_type {
            ProcurementType::Make => PlannedOrderType::Manufacturing,
            ProcurementType::Buy => PlannedOrderType::Purchase,
        }
    }
}

/// 計劃訂單（淨需求計算結果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedOrder {
    /// 品目代碼
    pub item_code: String,

    /// 品目名稱
    pub item_name: String,

    /// 訂單類型
    pub order_type: PlannedOrderType,

    /// 計劃數量（已套用批量規則）
    pub quantity: Decimal,

    /// 需求日期（到貨/完工日）
    pub due_date: NaiveDate,

    /// 提前期（天）
    pub lead_time_days: u32,

    /// 安全提前期（天）
    pub safety_lead_time_days: u32,
}

impl PlannedOrder {
    /// 創建新的計劃訂單
    pub fn new(
        item_code: String,
        item_name: String,
        order_type: PlannedOrderType,
        quantity: Decimal,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            item_code,
            item_name,
            order_type,
            quantity,
            due_date,
            lead_time_days: 0,
            safety_lead_time_days: 0,
        }
    }

    /// 建構器模式：設置提前期與安全提前期
    pub fn with_lead_times(mut self, lead_time_days: u32, safety_lead_time_days: u32) -> Self {
        self.lead_time_days = lead_time_days;
        self.safety_lead_time_days = safety_lead_time_days;
        self
    }

    /// 下單日期 = 需求日期 - (提前期 + 安全提前期)
    pub fn release_date(&self) -> NaiveDate {
        let offset = self.lead_time_days.saturating_add(self.safety_lead_time_days);
        self.due_date
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// 檢查是否為採購訂單
    pub fn is_purchase(&self) -> bool {
        self.order_type == PlannedOrderType::Purchase
    }

    /// 檢查是否為製造訂單
    pub fn is_manufacturing(&self) -> bool {
        self.order_type == PlannedOrderType::Manufacturing
    }
}

/// 缺料品目（診斷用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageItem {
    /// 品目代碼
    pub item_code: String,

    /// 品目名稱
    pub item_name: String,

    /// 缺料數量 = 安全庫存 - 現有庫存
    pub shortage_quantity: Decimal,

    /// 建議下單日期
    pub recommended_order_date: NaiveDate,
}

impl ShortageItem {
    /// 創建新的缺料記錄
    pub fn new(
        item_code: String,
        item_name: String,
        shortage_quantity: Decimal,
        recommended_order_date: NaiveDate,
    ) -> Self {
        Self {
            item_code,
            item_name,
            shortage_quantity,
            recommended_order_date,
        }
    }
}
