//! # MRP Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod context;
pub mod explosion;
pub mod item;
pub mod memory;
pub mod plan;
pub mod provider;
pub mod stock;
pub mod structure;

// Re-export 主要類型
pub use config::PlanningConfig;
pub use context::PlanningContext;
pub use explosion::{ExplosionLine, ImplosionLine};
pub use item::{Item, ItemCategory, ProcurementType};
pub use memory::{InMemoryItemRepository, InMemoryStockRepository, InMemoryStructureRepository};
pub use plan::{PlannedOrder, PlannedOrderType, ShortageItem};
pub use provider::{ItemProvider, StockProvider, StructureProvider};
pub use stock::{aggregate_on_hand, StockSnapshot};
pub use structure::StructureLink;

use rust_decimal::Decimal;

/// MRP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MrpError {
    #[error("找不到品目: {0}")]
    ItemNotFound(String),

    #[error("BOM 循環參照: {item_code}（路徑: {}）", .path.join(" → "))]
    CyclicStructure {
        /// 重複出現的品目
        item_code: String,
        /// 從根品目到偵測點的祖先路徑
        path: Vec<String>,
    },

    #[error("無效的數量: {0}（必須大於 0）")]
    InvalidQuantity(Decimal),

    #[error("無效的 BOM 連結 {parent} → {child}: {reason}")]
    InvalidStructureLink {
        parent: String,
        child: String,
        reason: String,
    },

    #[error("BOM 展開超過最大層級 {max_depth}: {item_code}")]
    ExplosionDepthExceeded { item_code: String, max_depth: usize },

    #[error("計算錯誤: {0}")]
    CalculationError(String),

    #[error("無效的品目分類: {0}")]
    InvalidCategory(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("計算已取消")]
    Cancelled,

    #[error("計算超過期限")]
    DeadlineExceeded,

    #[error(transparent)]
    DataAccess(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MrpError>;
