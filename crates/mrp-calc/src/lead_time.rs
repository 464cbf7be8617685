//! 交期計算（日曆日）

use chrono::{Days, NaiveDate};
use mrp_core::Item;

/// 交期計算器
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 建議下單日 = 計劃起始日 − (提前期 + 安全提前期)
    pub fn recommended_order_date(item: &Item, horizon_start: NaiveDate) -> NaiveDate {
        Self::subtract_days(horizon_start, item.total_lead_time_days())
    }

    /// 計劃訂單交期 = 計劃起始日 + 提前期
    pub fn due_date(item: &Item, horizon_start: NaiveDate) -> NaiveDate {
        Self::add_days(horizon_start, item.lead_time_days())
    }

    /// 往前推算天數，超出日期範圍時停在最小日期
    pub fn subtract_days(date: NaiveDate, days: u32) -> NaiveDate {
        date.checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// 往後推算天數，超出日期範圍時停在最大日期
    pub fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
        date.checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX)
    }
}
