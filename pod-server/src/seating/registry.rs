//! 餐舱登记表
//!
//! 单个门店的全部餐舱及其占用状态。所有变更都在门店锁内执行（见
//! manager 模块），因此两个并发预订不可能拿到同一个舱。
//!
//! 状态循环：`Available → Occupied → Cleaning → Available`。
//! 双人舱配对永远作为一个整体被预订、释放和清洁。

use std::collections::BTreeMap;

use thiserror::Error;

use shared::models::{Pod, PodKind, PodState};

use crate::venue::PodSpec;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Pod {0} not found")]
    PodNotFound(u32),

    #[error("Pod {pod} is {state:?}, expected {expected}")]
    StateConflict {
        pod: u32,
        state: PodState,
        expected: &'static str,
    },
}

/// 单门店餐舱池
#[derive(Debug)]
pub struct PodRegistry {
    /// BTreeMap 保证扫描顺序稳定（舱号升序）
    pods: BTreeMap<u32, Pod>,
}

impl PodRegistry {
    /// 从已校验的布局构建（配对对称性由 venue 层保证）
    pub fn from_specs(specs: &[PodSpec]) -> Self {
        let pods = specs
            .iter()
            .map(|s| (s.number, Pod::new(s.number, s.kind)))
            .collect();
        Self { pods }
    }

    pub fn get(&self, number: u32) -> Option<&Pod> {
        self.pods.get(&number)
    }

    /// 配对单元：单人舱返回自身，双人舱返回两半（升序）
    pub fn unit_of(&self, number: u32) -> Result<Vec<u32>, RegistryError> {
        let pod = self.pods.get(&number).ok_or(RegistryError::PodNotFound(number))?;
        let mut unit = match pod.kind {
            PodKind::Single => vec![number],
            PodKind::DualHalf { partner } => vec![number, partner],
        };
        unit.sort_unstable();
        Ok(unit)
    }

    /// 预订一个可用单元
    ///
    /// 按舱号升序扫描，返回第一个匹配的单元；双人请求必须两半同时可用，
    /// 整体预订或整体失败。无匹配返回 None —— 这不是错误，表示需要排队。
    pub fn try_reserve(&mut self, require_dual: bool) -> Option<Vec<u32>> {
        let numbers: Vec<u32> = self.pods.keys().copied().collect();
        for number in numbers {
            let pod = &self.pods[&number];
            if !pod.is_available() {
                continue;
            }
            match pod.kind {
                PodKind::Single if !require_dual => {
                    self.pods.get_mut(&number).unwrap().state = PodState::Occupied;
                    return Some(vec![number]);
                }
                PodKind::DualHalf { partner } if require_dual => {
                    // 两半必须同时可用，整体占用
                    let partner_free = self
                        .pods
                        .get(&partner)
                        .map(|p| p.is_available())
                        .unwrap_or(false);
                    if partner_free {
                        self.pods.get_mut(&number).unwrap().state = PodState::Occupied;
                        self.pods.get_mut(&partner).unwrap().state = PodState::Occupied;
                        let mut unit = vec![number, partner];
                        unit.sort_unstable();
                        return Some(unit);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// 释放占用中的舱（整个单元）到清洁状态
    ///
    /// 舱只有在显式的清洁完成信号后才会重新可用。
    pub fn release(&mut self, pods: &[u32]) -> Result<(), RegistryError> {
        let mut unit: Vec<u32> = Vec::new();
        for &number in pods {
            for n in self.unit_of(number)? {
                if !unit.contains(&n) {
                    unit.push(n);
                }
            }
        }
        for &n in &unit {
            let pod = &self.pods[&n];
            if pod.state != PodState::Occupied {
                return Err(RegistryError::StateConflict {
                    pod: n,
                    state: pod.state,
                    expected: "OCCUPIED",
                });
            }
        }
        for n in unit {
            self.pods.get_mut(&n).unwrap().state = PodState::Cleaning;
        }
        Ok(())
    }

    /// 清洁完成信号：整个单元回到可用状态
    ///
    /// 返回转换后的单元舱号；单元已经可用时返回空（重复信号视为无操作）。
    pub fn mark_available(&mut self, number: u32) -> Result<Vec<u32>, RegistryError> {
        let unit = self.unit_of(number)?;
        if unit.iter().all(|n| self.pods[n].state == PodState::Available) {
            return Ok(Vec::new());
        }
        for &n in &unit {
            let pod = &self.pods[&n];
            if pod.state != PodState::Cleaning {
                return Err(RegistryError::StateConflict {
                    pod: n,
                    state: pod.state,
                    expected: "CLEANING",
                });
            }
        }
        for &n in &unit {
            self.pods.get_mut(&n).unwrap().state = PodState::Available;
        }
        Ok(unit)
    }

    /// 软停用/恢复（整个单元）
    ///
    /// 只能停用空闲或清洁中的舱；占用中的舱必须先走完订单生命周期。
    pub fn set_out_of_service(&mut self, number: u32, out: bool) -> Result<Vec<u32>, RegistryError> {
        let unit = self.unit_of(number)?;
        if out {
            for &n in &unit {
                let pod = &self.pods[&n];
                if !matches!(pod.state, PodState::Available | PodState::Cleaning) {
                    return Err(RegistryError::StateConflict {
                        pod: n,
                        state: pod.state,
                        expected: "AVAILABLE or CLEANING",
                    });
                }
            }
            for &n in &unit {
                self.pods.get_mut(&n).unwrap().state = PodState::OutOfService;
            }
        } else {
            for &n in &unit {
                let pod = &self.pods[&n];
                if pod.state != PodState::OutOfService {
                    return Err(RegistryError::StateConflict {
                        pod: n,
                        state: pod.state,
                        expected: "OUT_OF_SERVICE",
                    });
                }
            }
            for &n in &unit {
                self.pods.get_mut(&n).unwrap().state = PodState::Available;
            }
        }
        Ok(unit)
    }

    /// 匹配某类请求的单元总数（不含停用），用于等待时间估算
    pub fn units_matching(&self, require_dual: bool) -> usize {
        self.pods
            .values()
            .filter(|p| p.state != PodState::OutOfService)
            .filter(|p| p.kind.is_dual() == require_dual)
            .map(|p| match p.kind {
                PodKind::Single => p.number,
                // 双人舱按单元计一次：取两半中较小的舱号
                PodKind::DualHalf { partner } => p.number.min(partner),
            })
            .collect::<std::collections::BTreeSet<u32>>()
            .len()
    }

    /// 所有舱的快照（舱号升序）
    pub fn snapshot(&self) -> Vec<Pod> {
        self.pods.values().cloned().collect()
    }
}
