//! SeatingManager - 餐舱分配与排队调度
//!
//! 每个门店一个 `Mutex<LocationSeating>`，所有变更操作（签到、确认、
//! 完成、清洁、取消）都在门店锁内按到达顺序串行执行，等价于每门店
//! 一个单线程 actor，从根上消除舱位状态的丢失更新。
//!
//! # 签到流程
//!
//! ```text
//! check_in(order)
//!     ├─ 1. 幂等检查 (已分配 → 返回既有分配，不再预订)
//!     ├─ 2. 营业时间闸门 (拒绝则无任何状态变更)
//!     ├─ 3. PodRegistry.try_reserve
//!     ├─ 4a. 成功 → 订单 ASSIGNED，绑定舱号
//!     ├─ 4b. 失败 → 入队，订单 QUEUED，返回位置和预计等待
//!     └─ 5. 锁外广播生命周期事件
//! ```
//!
//! 事件在状态变更提交后、锁释放后才广播：通知分发失败不会回滚
//! 调度决定，也不会阻塞下一个请求。

mod error;
pub use error::*;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use shared::models::Pod;
use shared::seating::{
    ArrivalPreference, BoardEntry, BoardView, CheckInOutcome, FulfillmentStatus, LifecycleEvent,
    PaymentStatus, SeatingOrder,
};
use shared::util::{display_code, new_order_id, now_millis};

use crate::core::Config;
use crate::hours;
use crate::venue::VenueDirectory;

use super::queue::WaitQueue;
use super::registry::PodRegistry;
use super::turnover::TurnoverTracker;

/// 新订单请求（支付成功回调边界）
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub location_id: i64,
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub party_size: u32,
    pub arrival: ArrivalPreference,
}

/// 单门店的调度状态，整体由门店锁保护
struct LocationSeating {
    location_id: i64,
    registry: PodRegistry,
    queue: WaitQueue,
    /// 活跃订单 (非终态)
    active: HashMap<String, SeatingOrder>,
    /// 终态订单归档，只增不删
    archived: HashMap<String, SeatingOrder>,
    /// 订单分配时刻，用于翻台时长采样
    assigned_at: HashMap<String, i64>,
    turnover: TurnoverTracker,
}

/// 排位调度器
///
/// `epoch` 是每次启动生成的唯一标识，客户端用它检测服务重启。
pub struct SeatingManager {
    venue: Arc<VenueDirectory>,
    locations: DashMap<i64, Mutex<LocationSeating>>,
    /// 订单 → 门店 反查索引
    order_index: DashMap<String, i64>,
    event_tx: broadcast::Sender<LifecycleEvent>,
    epoch: String,
    tz: Tz,
}

impl std::fmt::Debug for SeatingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatingManager")
            .field("epoch", &self.epoch)
            .field("locations", &self.locations.len())
            .finish()
    }
}

impl SeatingManager {
    pub fn new(venue: Arc<VenueDirectory>, config: &Config) -> Self {
        let locations = DashMap::new();
        for info in venue.iter() {
            locations.insert(
                info.id,
                Mutex::new(LocationSeating {
                    location_id: info.id,
                    registry: PodRegistry::from_specs(&info.pods),
                    queue: WaitQueue::new(),
                    active: HashMap::new(),
                    archived: HashMap::new(),
                    assigned_at: HashMap::new(),
                    turnover: TurnoverTracker::new(
                        config.turnover_window,
                        config.default_turnover_minutes,
                    ),
                }),
            );
        }
        let (event_tx, _) = broadcast::channel(config.notify_channel_capacity.max(16));
        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, locations = locations.len(), "SeatingManager started");
        Self {
            venue,
            locations,
            order_index: DashMap::new(),
            event_tx,
            epoch,
            tz: config.timezone,
        }
    }

    /// 订阅生命周期事件
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.event_tx.subscribe()
    }

    /// 服务实例 epoch
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    fn location_of(&self, order_id: &str) -> SeatingResult<i64> {
        self.order_index
            .get(order_id)
            .map(|r| *r)
            .ok_or_else(|| SeatingError::OrderNotFound(order_id.to_string()))
    }

    /// 锁外广播；无接收者只记日志，绝不回滚已提交的调度状态
    fn broadcast(&self, events: Vec<LifecycleEvent>) {
        for event in events {
            if self.event_tx.send(event).is_err() {
                tracing::warn!("Lifecycle broadcast failed: no active receivers");
                break;
            }
        }
    }

    // ========== 写操作 ==========

    /// 登记一笔已支付订单（支付回调边界）
    pub fn register_paid_order(&self, req: NewOrder) -> SeatingResult<SeatingOrder> {
        self.register_paid_order_at(req, self.now())
    }

    pub fn register_paid_order_at(
        &self,
        req: NewOrder,
        now: DateTime<Tz>,
    ) -> SeatingResult<SeatingOrder> {
        let schedule = self
            .venue
            .schedule(req.location_id)
            .ok_or(SeatingError::LocationNotFound(req.location_id))?;

        if req.party_size == 0 || req.party_size > 2 {
            return Err(SeatingError::PartyTooLarge(req.party_size));
        }

        if !hours::can_accept_order(schedule, now) {
            return Err(SeatingError::OutOfWindow {
                next_open_millis: hours::next_window_start(schedule, now)
                    .map(|t| t.timestamp_millis()),
                timezone: self.tz,
            });
        }
        if let ArrivalPreference::Offset { minutes } = req.arrival
            && !hours::valid_arrival_offsets(schedule, now).contains(&minutes)
        {
            return Err(SeatingError::InvalidArrivalOffset(minutes));
        }

        let order_id = new_order_id();
        let mut order = SeatingOrder {
            order_id: order_id.clone(),
            location_id: req.location_id,
            guest_name: req.guest_name,
            guest_phone: req.guest_phone,
            party_size: req.party_size,
            arrival: req.arrival,
            payment_status: PaymentStatus::Paid,
            status: FulfillmentStatus::PendingPayment,
            assigned_pods: vec![],
            created_at: now_millis(),
            checked_in_at: None,
            pod_confirmed_at: None,
            completed_at: None,
        };

        let mut events = Vec::new();
        apply_transition(&mut order, FulfillmentStatus::Paid, vec![], &mut events)?;

        let loc_ref = self
            .locations
            .get(&req.location_id)
            .ok_or(SeatingError::LocationNotFound(req.location_id))?;
        {
            let mut loc = loc_ref.lock();
            loc.active.insert(order_id.clone(), order.clone());
        }
        drop(loc_ref);
        self.order_index.insert(order_id.clone(), req.location_id);

        tracing::info!(order_id = %order_id, location_id = req.location_id, party = req.party_size, "Paid order registered");
        self.broadcast(events);
        Ok(order)
    }

    /// 签到：尝试分配舱位，失败则排队
    pub fn check_in(&self, order_id: &str) -> SeatingResult<CheckInOutcome> {
        self.check_in_at(order_id, self.now())
    }

    pub fn check_in_at(&self, order_id: &str, now: DateTime<Tz>) -> SeatingResult<CheckInOutcome> {
        let location_id = self.location_of(order_id)?;
        let loc_ref = self
            .locations
            .get(&location_id)
            .ok_or(SeatingError::LocationNotFound(location_id))?;

        let mut events = Vec::new();
        let result = {
            let mut loc = loc_ref.lock();

            // 幂等：重复投递的签到请求返回既有结果，不做第二次预订
            if let Some(order) = loc.active.get(order_id) {
                match order.status {
                    FulfillmentStatus::Assigned => {
                        return Ok(CheckInOutcome::Assigned {
                            pods: order.assigned_pods.clone(),
                        });
                    }
                    FulfillmentStatus::Queued => {
                        let requires_dual = order.requires_dual();
                        let position = loc.queue.position(order_id).unwrap_or(1);
                        let units = loc.registry.units_matching(requires_dual);
                        return Ok(CheckInOutcome::Queued {
                            position: position as u32,
                            estimated_wait_minutes: loc
                                .turnover
                                .estimate_wait_minutes(position, units),
                        });
                    }
                    FulfillmentStatus::Paid => {}
                    status => {
                        return Err(SeatingError::Conflict {
                            order_id: order_id.to_string(),
                            status,
                            action: "check in",
                        });
                    }
                }
            } else {
                let status = loc
                    .archived
                    .get(order_id)
                    .map(|o| o.status)
                    .ok_or_else(|| SeatingError::OrderNotFound(order_id.to_string()))?;
                return Err(SeatingError::Conflict {
                    order_id: order_id.to_string(),
                    status,
                    action: "check in",
                });
            }

            // 营业时间闸门：拒绝时无任何状态变更
            let schedule = self
                .venue
                .schedule(location_id)
                .ok_or(SeatingError::LocationNotFound(location_id))?;
            if !hours::can_accept_order(schedule, now) {
                return Err(SeatingError::OutOfWindow {
                    next_open_millis: hours::next_window_start(schedule, now)
                        .map(|t| t.timestamp_millis()),
                    timezone: self.tz,
                });
            }

            loc.check_in_paid_order(order_id, &mut events)
        };
        drop(loc_ref);

        self.broadcast(events);
        result
    }

    /// 到舱确认 (扫码)：ASSIGNED → PREPPING，厨房开工信号
    ///
    /// 已经 PREPPING 的重复提交是无操作成功。
    pub fn confirm_pod(&self, order_id: &str) -> SeatingResult<SeatingOrder> {
        self.mutate_order(order_id, "confirm pod", |_loc, order, events| {
            if order.status == FulfillmentStatus::Prepping {
                return Ok(()); // 重复扫码
            }
            if order.status != FulfillmentStatus::Assigned {
                return Err(SeatingError::Conflict {
                    order_id: order.order_id.clone(),
                    status: order.status,
                    action: "confirm pod",
                });
            }
            let pods = order.assigned_pods.clone();
            apply_transition(order, FulfillmentStatus::Prepping, pods, events)?;
            order.pod_confirmed_at = Some(now_millis());
            Ok(())
        })
    }

    /// 厨房出餐完成：PREPPING → READY
    pub fn mark_ready(&self, order_id: &str) -> SeatingResult<SeatingOrder> {
        self.mutate_order(order_id, "mark ready", |_loc, order, events| {
            apply_transition(order, FulfillmentStatus::Ready, vec![], events)
        })
    }

    /// 上餐：READY → SERVING
    pub fn mark_serving(&self, order_id: &str) -> SeatingResult<SeatingOrder> {
        self.mutate_order(order_id, "mark serving", |_loc, order, events| {
            apply_transition(order, FulfillmentStatus::Serving, vec![], events)
        })
    }

    /// 完成订单：SERVING → COMPLETED，释放舱位进入清洁状态
    pub fn complete(&self, order_id: &str) -> SeatingResult<SeatingOrder> {
        self.mutate_order(order_id, "complete", |loc, order, events| {
            if order.status != FulfillmentStatus::Serving {
                return Err(SeatingError::Conflict {
                    order_id: order.order_id.clone(),
                    status: order.status,
                    action: "complete",
                });
            }
            // 先释放舱位再转换状态：注册表拒绝时订单原样放回
            let pods = order.assigned_pods.clone();
            if !pods.is_empty() {
                loc.registry.release(&pods)?;
            }
            apply_transition(order, FulfillmentStatus::Completed, pods, events)?;
            order.completed_at = Some(now_millis());
            // 翻台时长采样：分配 → 释放
            if let Some(assigned) = loc.assigned_at.remove(&order.order_id) {
                loc.turnover.record(now_millis() - assigned);
            }
            Ok(())
        })
    }

    /// 取消订单：QUEUED 出队，ASSIGNED 立即释放舱位；PREPPING 起不可取消
    ///
    /// 与在途的舱位释放扫描竞争时由门店锁裁决：取消先到则订单先出队，
    /// 分配已提交则取消改为触发立即释放。
    pub fn cancel(&self, order_id: &str) -> SeatingResult<SeatingOrder> {
        self.mutate_order(order_id, "cancel", |loc, order, events| {
            if !order.status.is_pre_prepping() {
                return Err(SeatingError::Conflict {
                    order_id: order.order_id.clone(),
                    status: order.status,
                    action: "cancel",
                });
            }
            let pods = order.assigned_pods.clone();
            match order.status {
                FulfillmentStatus::Queued => {
                    loc.queue.remove(&order.order_id);
                }
                FulfillmentStatus::Assigned => {
                    loc.registry.release(&pods)?;
                    loc.assigned_at.remove(&order.order_id);
                }
                _ => {}
            }
            apply_transition(order, FulfillmentStatus::Cancelled, pods, events)
        })
    }

    /// 清洁完成信号：舱位单元回到可用状态，并立即重扫队列
    ///
    /// 返回被分配的订单号（如有）。重复信号是无操作成功。
    pub fn cleaning_done(&self, location_id: i64, pod: u32) -> SeatingResult<Option<String>> {
        let loc_ref = self
            .locations
            .get(&location_id)
            .ok_or(SeatingError::LocationNotFound(location_id))?;

        let mut events = Vec::new();
        let result = {
            let mut loc = loc_ref.lock();
            loc.registry
                .get(pod)
                .ok_or(SeatingError::PodNotFound { location_id, pod })?;
            let unit = loc.registry.mark_available(pod)?;
            if unit.is_empty() {
                // 已经可用，重复的清洁信号
                return Ok(None);
            }
            tracing::debug!(location_id, pod, unit = ?unit, "Pod cleaned, rescanning queue");
            loc.offer_freed_unit(unit.len() == 2, &mut events)
        };
        drop(loc_ref);

        self.broadcast(events);
        result
    }

    /// 软停用/恢复一个舱位单元
    ///
    /// 恢复的单元和清洁完成一样立即重扫队列：已排队的同类型订单
    /// 优先于后到的签到拿到舱位。
    pub fn set_pod_out_of_service(
        &self,
        location_id: i64,
        pod: u32,
        out: bool,
    ) -> SeatingResult<Vec<Pod>> {
        let loc_ref = self
            .locations
            .get(&location_id)
            .ok_or(SeatingError::LocationNotFound(location_id))?;

        let mut events = Vec::new();
        let snapshot = {
            let mut loc = loc_ref.lock();
            loc.registry
                .get(pod)
                .ok_or(SeatingError::PodNotFound { location_id, pod })?;
            let unit = loc.registry.set_out_of_service(pod, out)?;
            if !out {
                loc.offer_freed_unit(unit.len() == 2, &mut events)?;
            }
            loc.registry.snapshot()
        };
        drop(loc_ref);

        self.broadcast(events);
        Ok(snapshot)
    }

    // ========== 读操作 ==========

    /// 订单全量状态（含客人信息，仅限本人/员工接口）
    pub fn order_status(&self, order_id: &str) -> SeatingResult<SeatingOrder> {
        let location_id = self.location_of(order_id)?;
        let loc_ref = self
            .locations
            .get(&location_id)
            .ok_or(SeatingError::LocationNotFound(location_id))?;
        let loc = loc_ref.lock();
        loc.active
            .get(order_id)
            .or_else(|| loc.archived.get(order_id))
            .cloned()
            .ok_or_else(|| SeatingError::OrderNotFound(order_id.to_string()))
    }

    /// 队列看板快照（无隐私数据），供轮询端点使用
    pub fn board(&self, location_id: i64) -> SeatingResult<BoardView> {
        let loc_ref = self
            .locations
            .get(&location_id)
            .ok_or(SeatingError::LocationNotFound(location_id))?;
        let loc = loc_ref.lock();

        let queued = loc
            .queue
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let position = idx + 1;
                let units = loc.registry.units_matching(entry.requires_dual);
                BoardEntry {
                    code: display_code(&entry.order_id),
                    status: FulfillmentStatus::Queued,
                    position: Some(position as u32),
                    pods: vec![],
                    estimated_wait_minutes: Some(
                        loc.turnover.estimate_wait_minutes(position, units),
                    ),
                }
            })
            .collect();

        let mut in_progress: Vec<&SeatingOrder> = loc
            .active
            .values()
            .filter(|o| o.status.is_in_progress())
            .collect();
        in_progress.sort_by_key(|o| o.checked_in_at.unwrap_or(o.created_at));
        let in_progress = in_progress
            .into_iter()
            .map(|o| BoardEntry {
                code: display_code(&o.order_id),
                status: o.status,
                position: None,
                pods: o.assigned_pods.clone(),
                estimated_wait_minutes: None,
            })
            .collect();

        Ok(BoardView {
            location_id,
            queued,
            in_progress,
            as_of: now_millis(),
        })
    }

    /// 舱位快照（舱号升序）
    pub fn pods(&self, location_id: i64) -> SeatingResult<Vec<Pod>> {
        let loc_ref = self
            .locations
            .get(&location_id)
            .ok_or(SeatingError::LocationNotFound(location_id))?;
        let loc = loc_ref.lock();
        Ok(loc.registry.snapshot())
    }

    // ========== 内部 ==========

    /// 在门店锁内变更一个活跃订单，锁外广播事件
    fn mutate_order(
        &self,
        order_id: &str,
        action: &'static str,
        f: impl FnOnce(
            &mut LocationSeating,
            &mut SeatingOrder,
            &mut Vec<LifecycleEvent>,
        ) -> SeatingResult<()>,
    ) -> SeatingResult<SeatingOrder> {
        let location_id = self.location_of(order_id)?;
        let loc_ref = self
            .locations
            .get(&location_id)
            .ok_or(SeatingError::LocationNotFound(location_id))?;

        let mut events = Vec::new();
        let result = {
            let mut loc = loc_ref.lock();
            let mut order = match loc.active.remove(order_id) {
                Some(o) => o,
                None => {
                    return match loc.archived.get(order_id) {
                        Some(o) => Err(SeatingError::Conflict {
                            order_id: order_id.to_string(),
                            status: o.status,
                            action,
                        }),
                        None => Err(SeatingError::OrderNotFound(order_id.to_string())),
                    };
                }
            };

            match f(&mut loc, &mut order, &mut events) {
                Ok(()) => {
                    let snapshot = order.clone();
                    if order.status.is_terminal() {
                        loc.archived.insert(order_id.to_string(), order);
                    } else {
                        loc.active.insert(order_id.to_string(), order);
                    }
                    Ok(snapshot)
                }
                Err(e) => {
                    // 失败时原样放回，状态机不动
                    loc.active.insert(order_id.to_string(), order);
                    Err(e)
                }
            }
        };
        drop(loc_ref);

        if result.is_ok() {
            self.broadcast(events);
        }
        result
    }
}

impl LocationSeating {
    /// PAID 订单的首次签到：预订或排队
    fn check_in_paid_order(
        &mut self,
        order_id: &str,
        events: &mut Vec<LifecycleEvent>,
    ) -> SeatingResult<CheckInOutcome> {
        let mut order = self
            .active
            .remove(order_id)
            .ok_or_else(|| SeatingError::OrderNotFound(order_id.to_string()))?;
        let requires_dual = order.requires_dual();
        let now = now_millis();

        let outcome = match self.registry.try_reserve(requires_dual) {
            Some(pods) => {
                order.assigned_pods = pods.clone();
                order.checked_in_at = Some(now);
                apply_transition(&mut order, FulfillmentStatus::Assigned, pods.clone(), events)?;
                self.assigned_at.insert(order_id.to_string(), now);
                tracing::info!(location_id = self.location_id, order_id, pods = ?pods, "Check-in assigned");
                CheckInOutcome::Assigned { pods }
            }
            None => {
                let position = self.queue.push(order_id, requires_dual, now);
                order.checked_in_at = Some(now);
                apply_transition(&mut order, FulfillmentStatus::Queued, vec![], events)?;
                let units = self.registry.units_matching(requires_dual);
                let estimate = self.turnover.estimate_wait_minutes(position, units);
                tracing::info!(location_id = self.location_id, order_id, position, estimate, "Check-in queued");
                CheckInOutcome::Queued {
                    position: position as u32,
                    estimated_wait_minutes: estimate,
                }
            }
        };

        self.active.insert(order_id.to_string(), order);
        Ok(outcome)
    }

    /// 空出的单元提供给队列：从队首扫描，跳过类型不匹配的条目，
    /// 相同类型严格按入队顺序。无匹配时舱位保持可用等待下一次签到。
    fn offer_freed_unit(
        &mut self,
        dual_freed: bool,
        events: &mut Vec<LifecycleEvent>,
    ) -> SeatingResult<Option<String>> {
        let Some(entry) = self.queue.pop_first_matching(dual_freed) else {
            return Ok(None);
        };

        // 刚刚空出的单元一定能满足同类型请求
        let Some(pods) = self.registry.try_reserve(entry.requires_dual) else {
            tracing::error!(order_id = %entry.order_id, "Freed unit vanished before assignment");
            self.queue.restore_front(entry);
            return Ok(None);
        };

        let mut order = self
            .active
            .remove(&entry.order_id)
            .ok_or_else(|| SeatingError::OrderNotFound(entry.order_id.clone()))?;

        order.assigned_pods = pods.clone();
        apply_transition(&mut order, FulfillmentStatus::Assigned, pods.clone(), events)?;
        self.assigned_at.insert(entry.order_id.clone(), now_millis());
        tracing::info!(location_id = self.location_id, order_id = %entry.order_id, pods = ?pods, "Queued order assigned from freed pod");

        self.active.insert(entry.order_id.clone(), order);
        Ok(Some(entry.order_id))
    }
}

/// 通过状态机转换表变更订单状态，非法转换拒绝且不产生事件
fn apply_transition(
    order: &mut SeatingOrder,
    to: FulfillmentStatus,
    pods: Vec<u32>,
    events: &mut Vec<LifecycleEvent>,
) -> SeatingResult<()> {
    if !order.status.can_transition(to) {
        return Err(SeatingError::Conflict {
            order_id: order.order_id.clone(),
            status: order.status,
            action: "transition",
        });
    }
    let from = order.status;
    order.status = to;
    events.push(LifecycleEvent::new(
        order.order_id.clone(),
        order.location_id,
        from,
        to,
        pods,
    ));
    Ok(())
}

#[cfg(test)]
mod tests;
