//! BOM 展開結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 正展開明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionLine {
    /// 層級（根品目的直接子件為 1）
    pub level: u32,

    /// 父件品目代碼
    pub parent_item_code: String,

    /// 品目代碼
    pub item_code: String,

    /// 品目名稱
    pub item_name: String,

    /// 工順
    pub sequence: u32,

    /// 每單位父件用量
    pub quantity_per: Decimal,

    /// 累計需求數量 = 父件需求數量 × 用量
    pub required_quantity: Decimal,
}

/// 逆展開明細（多層使用先）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplosionLine {
    /// 層級（直接使用的父件為 1）
    pub level: u32,

    /// 使用該品目的子件代碼
    pub child_item_code: String,

    /// 父件品目代碼
    pub item_code: String,

    /// 父件品目名稱
    pub item_name: String,

    /// 每單位父件用量
    pub quantity_per: Decimal,
}
