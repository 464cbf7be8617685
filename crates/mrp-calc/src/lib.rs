//! # MRP Calculation Engine
//!
//! 淨需求計算與計劃執行

pub mod lead_time;
pub mod lot_sizing;
pub mod netting;
pub mod orchestrator;

// Re-export 主要類型
pub use lead_time::LeadTimeCalculator;
pub use lot_sizing::LotSizingCalculator;
pub use netting::{NettingCalculator, NettingOutcome};
pub use orchestrator::PlanningOrchestrator;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// 計劃執行結果
#[derive(Debug, Clone, Serialize)]
pub struct PlanningResult {
    /// 執行識別碼
    pub run_id: Uuid,

    /// 執行時間
    pub executed_at: DateTime<Utc>,

    /// 計劃起始日
    pub horizon_start: NaiveDate,

    /// 計劃結束日（僅作標示，不限制計算範圍）
    pub horizon_end: NaiveDate,

    /// 計劃訂單（依品目代碼排序）
    pub planned_orders: Vec<mrp_core::PlannedOrder>,

    /// 缺料清單（依品目代碼排序）
    pub shortage_items: Vec<mrp_core::ShortageItem>,

    /// 警告信息
    pub warnings: Vec<MrpWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanningResult {
    /// 創建空的計劃結果
    pub fn empty(horizon_start: NaiveDate, horizon_end: NaiveDate) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            executed_at: Utc::now(),
            horizon_start,
            horizon_end,
            planned_orders: Vec::new(),
            shortage_items: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: MrpWarning) {
        self.warnings.push(warning);
    }

    /// 查詢指定品目的計劃訂單
    pub fn planned_order(&self, item_code: &str) -> Option<&mrp_core::PlannedOrder> {
        self.planned_orders.iter().find(|o| o.item_code == item_code)
    }

    /// 查詢指定品目的缺料記錄
    pub fn shortage_item(&self, item_code: &str) -> Option<&mrp_core::ShortageItem> {
        self.shortage_items.iter().find(|s| s.item_code == item_code)
    }
}

/// MRP 警告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MrpWarning {
    pub item_code: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl MrpWarning {
    pub fn new(item_code: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            item_code,
            message,
            severity,
        }
    }

    pub fn info(item_code: String, message: String) -> Self {
        Self::new(item_code, message, WarningSeverity::Info)
    }

    pub fn warning(item_code: String, message: String) -> Self {
        Self::new(item_code, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningSeverity {
    Info,
    Warning,
}
