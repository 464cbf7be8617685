//! 計劃執行配置

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{MrpError, Result};

/// 預設最大展開層級
pub const DEFAULT_MAX_EXPLOSION_DEPTH: usize = 64;

/// MRP 執行配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 是否並行計算各品目
    pub parallel: bool,

    /// 專用執行緒池大小（未設定時使用 rayon 全域池）
    pub worker_threads: Option<usize>,

    /// BOM 展開最大層級
    pub max_explosion_depth: usize,

    /// 單次計劃執行期限（毫秒）
    pub run_deadline_ms: Option<u64>,
}

impl PlanningConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            parallel: true,
            worker_threads: None,
            max_explosion_depth: DEFAULT_MAX_EXPLOSION_DEPTH,
            run_deadline_ms: None,
        }
    }

    /// 從 JSON 載入（缺少的欄位使用預設值）
    ///
    /// # 範例
    /// ```
    /// # use mrp_core::PlanningConfig;
    /// let config = PlanningConfig::from_json(r#"{ "worker_threads": 4 }"#).unwrap();
    /// assert_eq!(config.worker_threads, Some(4));
    /// assert!(config.parallel);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MrpError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置是否並行
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 建構器模式：設置執行緒數
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// 建構器模式：設置最大展開層級
    pub fn with_max_explosion_depth(mut self, depth: usize) -> Self {
        self.max_explosion_depth = depth;
        self
    }

    /// 建構器模式：設置執行期限
    pub fn with_run_deadline(mut self, deadline: Duration) -> Self {
        self.run_deadline_ms = Some(u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// 執行期限
    pub fn run_deadline(&self) -> Option<Duration> {
        self.run_deadline_ms.map(Duration::from_millis)
    }

    /// 檢查配置
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == Some(0) {
            return Err(MrpError::InvalidConfig(
                "worker_threads 必須大於 0".to_string(),
            ));
        }
        if self.max_explosion_depth == 0 {
            return Err(MrpError::InvalidConfig(
                "max_explosion_depth 必須大於 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self::new()
    }
}
