//! 等位队列
//!
//! 按入队时间排序的等待列表。调度器在分配空出的舱时允许跳过需求类型
//! 不匹配的队首（bounded head-of-line skip）：双人请求不会阻塞后面的
//! 单人请求，反之亦然。相同需求类型之间严格先进先出，绝不重排。

use std::collections::VecDeque;

/// 队列条目：(订单, 入队时间, 舱型需求)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub order_id: String,
    /// Unix millis，排序键
    pub enqueued_at: i64,
    pub requires_dual: bool,
}

/// 单门店等位队列
#[derive(Debug, Default)]
pub struct WaitQueue {
    entries: VecDeque<QueueEntry>,
}

impl WaitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入队，返回 1-based 位置
    pub fn push(&mut self, order_id: impl Into<String>, requires_dual: bool, now: i64) -> usize {
        self.entries.push_back(QueueEntry {
            order_id: order_id.into(),
            enqueued_at: now,
            requires_dual,
        });
        self.entries.len()
    }

    /// 当前位置（1-based）
    pub fn position(&self, order_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.order_id == order_id)
            .map(|i| i + 1)
    }

    /// 取出第一个需求类型匹配的条目
    ///
    /// 从队首扫描，跳过需求不匹配的条目。同类型条目由扫描顺序保证
    /// 先进先出。
    pub fn pop_first_matching(&mut self, dual_freed: bool) -> Option<QueueEntry> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.requires_dual == dual_freed)?;
        self.entries.remove(idx)
    }

    /// 放回队首（分配中途失败时恢复原顺序）
    pub fn restore_front(&mut self, entry: QueueEntry) {
        self.entries.push_front(entry);
    }

    /// 取消时移除；订单不在队列中返回 false
    pub fn remove(&mut self, order_id: &str) -> bool {
        if let Some(idx) = self.entries.iter().position(|e| e.order_id == order_id) {
            self.entries.remove(idx);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }
}
