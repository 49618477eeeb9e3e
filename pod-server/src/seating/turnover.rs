//! 翻台时长滚动平均
//!
//! 排队响应里的预计等待时间来自最近 N 次翻台（入座→释放）时长的
//! 滚动平均。纯粹是给客人的参考值，不是承诺；窗口大小和初始估值
//! 都是可调策略。

use std::collections::VecDeque;

/// 翻台时长追踪器（单门店）
#[derive(Debug)]
pub struct TurnoverTracker {
    /// 最近的翻台时长样本（毫秒），定长滑动窗口
    samples: VecDeque<i64>,
    window: usize,
    /// 无样本时的初始估值（分钟）
    default_minutes: u32,
}

impl TurnoverTracker {
    pub fn new(window: usize, default_minutes: u32) -> Self {
        Self {
            samples: VecDeque::with_capacity(window.max(1)),
            window: window.max(1),
            default_minutes,
        }
    }

    /// 记录一次翻台时长；非正值丢弃（时钟回拨等异常）
    pub fn record(&mut self, duration_ms: i64) {
        if duration_ms <= 0 {
            return;
        }
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(duration_ms);
    }

    /// 平均翻台时长（分钟，向上取整，最少 1）
    pub fn average_minutes(&self) -> u32 {
        if self.samples.is_empty() {
            return self.default_minutes.max(1);
        }
        let sum: i64 = self.samples.iter().sum();
        let avg_ms = sum / self.samples.len() as i64;
        ((avg_ms + 59_999) / 60_000).max(1) as u32
    }

    /// 预计等待（分钟）：平均翻台 × 队列位置 ÷ 匹配单元数
    pub fn estimate_wait_minutes(&self, position: usize, matching_units: usize) -> u32 {
        let avg = self.average_minutes() as u64;
        let units = matching_units.max(1) as u64;
        let pos = position.max(1) as u64;
        avg.saturating_mul(pos).div_ceil(units).min(u32::MAX as u64) as u32
    }
}
