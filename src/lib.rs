//! # MRP Planning
//!
//! 計劃引擎對外介面：BOM 正展開、使用先照會與淨需求計劃執行。
//!
//! 主檔、BOM 與庫存由呼叫端透過 provider 介面提供，引擎本身不持有任何狀態。

pub mod logging;

pub use mrp_bom::{summarize_requirements, BomExplosionEngine, StructureGraph};
pub use mrp_calc::{MrpWarning, PlanningOrchestrator, PlanningResult, WarningSeverity};
pub use mrp_core::*;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// 計劃引擎
pub struct PlanningEngine<I, T, S> {
    /// 品目主檔來源
    items: I,

    /// BOM 來源
    structures: T,

    /// 庫存來源
    stock: S,

    /// 執行配置
    config: PlanningConfig,
}

impl<I, T, S> PlanningEngine<I, T, S>
where
    I: ItemProvider,
    T: StructureProvider,
    S: StockProvider,
{
    /// 創建新的計劃引擎（預設配置）
    pub fn new(items: I, structures: T, stock: S) -> Self {
        Self {
            items,
            structures,
            stock,
            config: PlanningConfig::default(),
        }
    }

    /// 建構器模式：設置執行配置
    pub fn with_config(mut self, config: PlanningConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 正展開
    pub fn explode(&self, item_code: &str, quantity: Decimal) -> Result<Vec<ExplosionLine>> {
        self.explode_as_of(item_code, quantity, None)
    }

    /// 正展開（只使用 `as_of` 當日有效的 BOM 連結）
    pub fn explode_as_of(
        &self,
        item_code: &str,
        quantity: Decimal,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<ExplosionLine>> {
        if quantity <= Decimal::ZERO {
            return Err(MrpError::InvalidQuantity(quantity));
        }
        self.config.validate()?;

        let graph = StructureGraph::load_reachable(&self.structures, item_code)?;
        self.bom_engine(&graph).explode_as_of(item_code, quantity, as_of)
    }

    /// 使用先照會（單層，返回父件品目）
    pub fn where_used(&self, item_code: &str) -> Result<Vec<Item>> {
        let graph = StructureGraph::from_valid_links(self.structures.find_by_child(item_code)?);
        self.bom_engine(&graph).where_used(item_code)
    }

    /// 使用先照會（單層，返回 BOM 連結）
    pub fn where_used_links(&self, item_code: &str) -> Result<Vec<StructureLink>> {
        let graph = StructureGraph::from_valid_links(self.structures.find_by_child(item_code)?);
        self.bom_engine(&graph).where_used_links(item_code)
    }

    /// 多層逆展開
    pub fn implode(&self, item_code: &str) -> Result<Vec<ImplosionLine>> {
        self.config.validate()?;
        let graph = StructureGraph::load_users(&self.structures, item_code)?;
        self.bom_engine(&graph).implode(item_code)
    }

    /// 執行計劃
    pub fn run_planning(&self, start: NaiveDate, end: NaiveDate) -> Result<PlanningResult> {
        PlanningOrchestrator::new(&self.items, &self.stock)
            .with_config(self.config.clone())
            .run(start, end)
    }

    fn bom_engine<'a>(&'a self, graph: &'a StructureGraph) -> BomExplosionEngine<'a, I> {
        BomExplosionEngine::new(graph, &self.items)
            .with_max_depth(self.config.max_explosion_depth)
            .with_context(PlanningContext::with_optional_timeout(self.config.run_deadline()))
    }
}
