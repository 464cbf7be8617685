//! 部品構成（BOM 連結）模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// BOM 連結：父件 → 子件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureLink {
    /// 父件品目代碼
    pub parent_item_code: String,

    /// 子件品目代碼
    pub child_item_code: String,

    /// 基準數量（父件數量）
    pub base_quantity: Decimal,

    /// 必要數量（每基準數量所需子件數）
    pub required_quantity: Decimal,

    /// 工順（同一父件下子件的排列順序）
    pub sequence: u32,

    /// 生效日（含）
    pub effective_from: Option<NaiveDate>,

    /// 失效日（不含）
    pub effective_to: Option<NaiveDate>,
}

impl StructureLink {
    /// 創建新的 BOM 連結（基準數量 1）
    pub fn new(
        parent_item_code: impl Into<String>,
        child_item_code: impl Into<String>,
        required_quantity: Decimal,
    ) -> Self {
        Self {
            parent_item_code: parent_item_code.into(),
            child_item_code: child_item_code.into(),
            base_quantity: Decimal::ONE,
            required_quantity,
            sequence: 0,
            effective_from: None,
            effective_to: None,
        }
    }

    /// 建構器模式：設置工順
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// 建構器模式：設置基準數量
    pub fn with_base_quantity(mut self, base_quantity: Decimal) -> Self {
        self.base_quantity = base_quantity;
        self
    }

    /// 建構器模式：設置有效期間
    pub fn with_effective_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.effective_from = from;
        self.effective_to = to;
        self
    }

    /// 每單位父件所需子件數量（必要數量 / 基準數量）
    ///
    /// 基準數量非正數時返回 `None`
    pub fn quantity_per(&self) -> Option<Decimal> {
        if self.base_quantity <= Decimal::ZERO {
            return None;
        }
        self.required_quantity.checked_div(self.base_quantity)
    }

    /// 指定日期是否在有效期間內
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        let started = self.effective_from.map_or(true, |from| from <= date);
        let not_ended = self.effective_to.map_or(true, |to| date < to);
        started && not_ended
    }
}
