//! 营业时间闸门
//!
//! 纯函数：给定门店时间表和当前时刻，判定是否接受新订单以及哪些到店
//! 时间偏移有效。无状态、无副作用，任意数量的并发读取都安全。
//!
//! 下单窗口为 `[open - lead, close - cutoff)`。窗口外的每个到店偏移
//! (ASAP, +15, +30, …) 都会被过滤；提前下单的到店时间被钉在开门时刻，
//! 不会早于开门。

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use shared::models::LocationSchedule;

/// 候选到店偏移（分钟）：ASAP, +15, +30, +45, +60
pub const ARRIVAL_OFFSETS: [u32; 5] = [0, 15, 30, 45, 60];

/// 某一天的下单窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingWindow {
    /// 下单开放时刻 (open - lead)
    pub start: DateTime<Tz>,
    /// 下单截止时刻 (close - cutoff)，不含
    pub end: DateTime<Tz>,
    /// 门店开门时刻（到店时间下界）
    pub open: DateTime<Tz>,
    /// 门店打烊时刻（到店时间上界，不含）
    pub close: DateTime<Tz>,
}

impl OrderingWindow {
    pub fn contains(&self, now: DateTime<Tz>) -> bool {
        self.start <= now && now < self.end
    }
}

/// 本地日期时间，DST 间隙 fallback 到 UTC 解释
fn local_dt(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Tz> {
    let naive = date.and_time(time);
    naive
        .and_local_timezone(tz)
        .latest()
        .unwrap_or_else(|| naive.and_utc().with_timezone(&tz))
}

/// 指定日期的下单窗口；闭店日或窗口为空时返回 None
pub fn window_for(schedule: &LocationSchedule, date: NaiveDate, tz: Tz) -> Option<OrderingWindow> {
    let hours = schedule.hours_for(date.weekday())?;
    let open = local_dt(date, hours.open, tz);
    let close = local_dt(date, hours.close, tz);
    let start = open - Duration::minutes(schedule.order_open_lead_minutes as i64);
    let end = close - Duration::minutes(schedule.order_close_cutoff_minutes as i64);
    if start >= end {
        return None;
    }
    Some(OrderingWindow {
        start,
        end,
        open,
        close,
    })
}

/// 包含 `now` 的下单窗口
///
/// lead 可能使窗口起点落在日历上的前一天，所以相邻三天的窗口都要查。
pub fn current_window(schedule: &LocationSchedule, now: DateTime<Tz>) -> Option<OrderingWindow> {
    let tz = now.timezone();
    let today = now.date_naive();
    for date in [today - Duration::days(1), today, today + Duration::days(1)] {
        if let Some(window) = window_for(schedule, date, tz)
            && window.contains(now)
        {
            return Some(window);
        }
    }
    None
}

/// 当前是否接受新订单
pub fn can_accept_order(schedule: &LocationSchedule, now: DateTime<Tz>) -> bool {
    current_window(schedule, now).is_some()
}

/// 当前有效的到店偏移集合（升序）
///
/// 到店时间 = max(now + offset, open)，即钉在开门时刻之后；
/// 钉完仍落在打烊时刻（含）之后的偏移被过滤。窗口外返回空集。
pub fn valid_arrival_offsets(schedule: &LocationSchedule, now: DateTime<Tz>) -> Vec<u32> {
    let Some(window) = current_window(schedule, now) else {
        return Vec::new();
    };
    ARRIVAL_OFFSETS
        .iter()
        .copied()
        .filter(|offset| {
            let arrival = (now + Duration::minutes(*offset as i64)).max(window.open);
            arrival < window.close
        })
        .collect()
}

/// 下一个下单窗口的起点（含当天未开始的窗口）；一周内无窗口返回 None
pub fn next_window_start(schedule: &LocationSchedule, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.date_naive();
    for day in 0..=7 {
        let date = today + Duration::days(day);
        if let Some(window) = window_for(schedule, date, tz)
            && window.start > now
        {
            return Some(window.start);
        }
    }
    None
}
