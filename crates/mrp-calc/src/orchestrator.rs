//! 計劃執行器

use chrono::NaiveDate;
use mrp_core::{
    aggregate_on_hand, Item, ItemProvider, MrpError, PlanningConfig, PlanningContext, Result,
    StockProvider,
};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

use crate::netting::{NettingCalculator, NettingOutcome};
use crate::{MrpWarning, PlanningResult};

/// 計劃執行器
///
/// 每次執行只讀取一次品目主檔與庫存快照，各品目的淨需求互不相依。
pub struct PlanningOrchestrator<I, S> {
    /// 品目主檔來源
    items: I,

    /// 庫存來源
    stock: S,

    /// 執行配置
    config: PlanningConfig,
}

impl<I, S> PlanningOrchestrator<I, S>
where
    I: ItemProvider,
    S: StockProvider,
{
    /// 創建新的計劃執行器（預設配置）
    pub fn new(items: I, stock: S) -> Self {
        Self {
            items,
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

    /// 執行計劃（期限取自配置）
    pub fn run(&self, horizon_start: NaiveDate, horizon_end: NaiveDate) -> Result<PlanningResult> {
        let context = PlanningContext::with_optional_timeout(self.config.run_deadline());
        self.run_with_context(horizon_start, horizon_end, &context)
    }

    /// 執行計劃
    ///
    /// `horizon_end` 只標示於結果中，不限制參與計算的品目。
    pub fn run_with_context(
        &self,
        horizon_start: NaiveDate,
        horizon_end: NaiveDate,
        context: &PlanningContext,
    ) -> Result<PlanningResult> {
        self.config.validate()?;
        context.check()?;

        if horizon_end < horizon_start {
            tracing::warn!("計劃結束日 {} 早於起始日 {}", horizon_end, horizon_start);
        }

        let start_time = std::time::Instant::now();

        let items = self.items.find_all()?;
        let snapshots = self.stock.find_all()?;
        tracing::info!(
            "開始計劃執行：品目 {} 筆，庫存 {} 筆，期間 {} ~ {}",
            items.len(),
            snapshots.len(),
            horizon_start,
            horizon_end
        );

        let on_hand = aggregate_on_hand(&snapshots)?;
        let mut result = PlanningResult::empty(horizon_start, horizon_end);
        for warning in Self::orphan_stock_warnings(&items, &on_hand) {
            result.add_warning(warning);
        }

        let (mut outcomes, mut skipped) = self.net_all(&items, &on_hand, horizon_start)?;
        context.check()?;

        outcomes.sort_by(|a, b| a.planned_order.item_code.cmp(&b.planned_order.item_code));
        for outcome in outcomes {
            result.warnings.extend(outcome.warnings);
            result.shortage_items.push(outcome.shortage);
            result.planned_orders.push(outcome.planned_order);
        }
        skipped.sort_by(|a, b| a.item_code.cmp(&b.item_code));
        result.warnings.extend(skipped);
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("計劃執行完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "計劃訂單數量: {}，缺料品目: {}，警告: {}",
            result.planned_orders.len(),
            result.shortage_items.len(),
            result.warnings.len()
        );

        Ok(result)
    }

    /// 對全部品目計算淨需求（輸出順序未排序）
    ///
    /// 數量溢位的品目不產生訂單，改以警告回報，其餘品目照常計算。
    fn net_all(
        &self,
        items: &[Item],
        on_hand: &BTreeMap<String, Decimal>,
        horizon_start: NaiveDate,
    ) -> Result<(Vec<NettingOutcome>, Vec<MrpWarning>)> {
        let net = |item: &Item| -> Option<std::result::Result<NettingOutcome, MrpWarning>> {
            let stock = on_hand
                .get(&item.item_code)
                .copied()
                .unwrap_or(Decimal::ZERO);
            match NettingCalculator::net_item(item, stock, horizon_start) {
                Ok(outcome) => outcome.map(Ok),
                Err(e) => {
                    tracing::warn!("品目 {} 淨需求計算失敗，略過: {}", item.item_code, e);
                    Some(Err(MrpWarning::warning(item.item_code.clone(), e.to_string())))
                }
            }
        };

        let netted: Vec<_> = if !self.config.parallel {
            items.iter().filter_map(net).collect()
        } else {
            match self.config.worker_threads {
                Some(threads) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build()
                        .map_err(|e| MrpError::CalculationError(format!("建立執行緒池失敗: {}", e)))?;
                    pool.install(|| items.par_iter().filter_map(net).collect())
                }
                None => items.par_iter().filter_map(net).collect(),
            }
        };

        let mut outcomes = Vec::with_capacity(netted.len());
        let mut skipped = Vec::new();
        for entry in netted {
            match entry {
                Ok(outcome) => outcomes.push(outcome),
                Err(warning) => skipped.push(warning),
            }
        }
        Ok((outcomes, skipped))
    }

    /// 主檔中不存在的品目庫存不參與計算
    fn orphan_stock_warnings(
        items: &[Item],
        on_hand: &BTreeMap<String, Decimal>,
    ) -> Vec<MrpWarning> {
        let known: BTreeSet<&str> = items.iter().map(|i| i.item_code.as_str()).collect();
        on_hand
            .keys()
            .filter(|code| !known.contains(code.as_str()))
            .map(|code| {
                tracing::warn!("庫存品目 {} 不在品目主檔中，略過", code);
                MrpWarning::info(code.clone(), "庫存品目不在品目主檔中，已略過".to_string())
            })
            .collect()
    }
}
