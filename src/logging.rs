//! 日誌初始化（tracing-subscriber）

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌
///
/// 讀取 `RUST_LOG`，未設定時為 `info`。重複初始化時返回錯誤。
///
/// # 範例
/// ```no_run
/// mrp_planning::logging::init_tracing().ok();
/// ```
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("日誌初始化失敗: {}", e))
}

/// 測試用日誌（debug 級別，輸出至測試擷取）
pub fn init_test_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
