//! 品目主檔模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::MrpError;

/// 採購類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcurementType {
    /// 採購
    Buy,
    /// 生產
    Make,
}

/// 品目分類
///
/// 分為「自製」(製品、半製品、中間品) 與「外購」(部品、材料、原料、資材) 兩組。
/// 新增分類時，[`ItemCategory::procurement_type`] 的 match 會在編譯期強制補上對應。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// 製品
    Product,
    /// 半製品
    SemiProduct,
    /// 中間品
    Intermediate,
    /// 部品
    Part,
    /// 材料
    Material,
    /// 原料
    RawMaterial,
    /// 資材
    Supply,
}

impl ItemCategory {
    /// 全部分類（固定順序）
    pub const ALL: [ItemCategory; 7] = [
        ItemCategory::Product,
        ItemCategory::SemiProduct,
        ItemCategory::Intermediate,
        ItemCategory::Part,
        ItemCategory::Material,
        ItemCategory::RawMaterial,
        ItemCategory::Supply,
    ];

    /// 自製或外購
    pub fn procurement_type(self) -> ProcurementType {
        match self {
            ItemCategory::Product | ItemCategory::SemiProduct | ItemCategory::Intermediate => {
                ProcurementType::Make
            }
            ItemCategory::Part
            | ItemCategory::Material
            | ItemCategory::RawMaterial
            | ItemCategory::Supply => ProcurementType::Buy,
        }
    }

    /// 分類代碼
    pub fn code(self) -> &'static str {
        match self {
            ItemCategory::Product => "PRODUCT",
            ItemCategory::SemiProduct => "SEMI_PRODUCT",
            ItemCategory::Intermediate => "INTERMEDIATE",
            ItemCategory::Part => "PART",
            ItemCategory::Material => "MATERIAL",
            ItemCategory::RawMaterial => "RAW_MATERIAL",
            ItemCategory::Supply => "SUPPLY",
        }
    }

    /// 主檔畫面使用的顯示名稱
    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Product => "製品",
            ItemCategory::SemiProduct => "半製品",
            ItemCategory::Intermediate => "中間品",
            ItemCategory::Part => "部品",
            ItemCategory::Material => "材料",
            ItemCategory::RawMaterial => "原料",
            ItemCategory::Supply => "資材",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ItemCategory {
    type Err = MrpError;

    /// 接受分類代碼（不分大小寫）或顯示名稱
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ItemCategory::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(trimmed) || c.label() == trimmed)
            .ok_or_else(|| MrpError::InvalidCategory(s.to_string()))
    }
}

/// 品目（MRP 計算期間不可變）
///
/// 數值欄位允許為空，空值由存取方法套用預設值：
/// 提前期與安全提前期為 0、安全庫存為 0、最小批量與批量增量為 1。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// 品目代碼（唯一鍵）
    pub item_code: String,

    /// 品目名稱
    pub item_name: String,

    /// 品目分類（未設定時視為外購）
    pub item_category: Option<ItemCategory>,

    /// 提前期（天）
    pub lead_time: Option<u32>,

    /// 安全提前期（天）
    pub safety_lead_time: Option<u32>,

    /// 安全庫存
    pub safety_stock: Option<Decimal>,

    /// 最小批量
    pub min_lot_size: Option<Decimal>,

    /// 批量增量
    pub lot_increment: Option<Decimal>,

    /// 最大批量
    pub max_lot_size: Option<Decimal>,
}

impl Item {
    /// 創建新的品目（數值欄位皆為空）
    pub fn new(item_code: impl Into<String>, item_name: impl Into<String>) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: item_name.into(),
            item_category: None,
            lead_time: None,
            safety_lead_time: None,
            safety_stock: None,
            min_lot_size: None,
            lot_increment: None,
            max_lot_size: None,
        }
    }

    /// 建構器模式：設置分類
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.item_category = Some(category);
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time = Some(days);
        self
    }

    /// 建構器模式：設置安全提前期
    pub fn with_safety_lead_time(mut self, days: u32) -> Self {
        self.safety_lead_time = Some(days);
        self
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, qty: Decimal) -> Self {
        self.safety_stock = Some(qty);
        self
    }

    /// 建構器模式：設置最小批量
    pub fn with_min_lot_size(mut self, qty: Decimal) -> Self {
        self.min_lot_size = Some(qty);
        self
    }

    /// 建構器模式：設置批量增量
    pub fn with_lot_increment(mut self, qty: Decimal) -> Self {
        self.lot_increment = Some(qty);
        self
    }

    /// 建構器模式：設置最大批量
    pub fn with_max_lot_size(mut self, qty: Decimal) -> Self {
        self.max_lot_size = Some(qty);
        self
    }

    pub fn lead_time_days(&self) -> u32 {
        self.lead_time.unwrap_or(0)
    }

    pub fn safety_lead_time_days(&self) -> u32 {
        self.safety_lead_time.unwrap_or(0)
    }

    /// 提前期 + 安全提前期
    pub fn total_lead_time_days(&self) -> u32 {
        self.lead_time_days()
            .saturating_add(self.safety_lead_time_days())
    }

    pub fn safety_stock_qty(&self) -> Decimal {
        self.safety_stock.unwrap_or(Decimal::ZERO)
    }

    /// 最小批量（空值或非正數時為 1）
    pub fn min_lot_size_qty(&self) -> Decimal {
        positive_or_one(self.min_lot_size)
    }

    /// 批量增量（空值或非正數時為 1）
    pub fn lot_increment_qty(&self) -> Decimal {
        positive_or_one(self.lot_increment)
    }

    /// 主檔中的批量參數是否違反「必須為正數」
    pub fn has_invalid_lot_parameters(&self) -> bool {
        let invalid = |v: Option<Decimal>| matches!(v, Some(q) if q <= Decimal::ZERO);
        invalid(self.min_lot_size) || invalid(self.lot_increment)
    }

    /// 自製或外購（未設定分類時為外購）
    pub fn procurement_type(&self) -> ProcurementType {
        self.item_category
            .map(ItemCategory::procurement_type)
            .unwrap_or(ProcurementType::Buy)
    }
}

fn positive_or_one(value: Option<Decimal>) -> Decimal {
    match value {
        Some(q) if q > Decimal::ZERO => q,
        _ => Decimal::ONE,
    }
}
