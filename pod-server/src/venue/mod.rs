//! 门店布局目录
//!
//! 启动时从 JSON 布局文件加载各门店的餐舱配置和营业时间表，
//! 校验双人舱配对的对称性后构建只读目录。布局非法时拒绝启动。
//!
//! 布局文件示例：
//!
//! ```json
//! {
//!   "locations": [{
//!     "id": 1,
//!     "name": "Centro",
//!     "schedule": {
//!       "days": { "mon": { "open": "11:00", "close": "22:00" } },
//!       "order_open_lead_minutes": 30,
//!       "order_close_cutoff_minutes": 45
//!     },
//!     "pods": [
//!       { "number": 1, "kind": { "type": "SINGLE" } },
//!       { "number": 5, "kind": { "type": "DUAL_HALF", "partner": 6 } },
//!       { "number": 6, "kind": { "type": "DUAL_HALF", "partner": 5 } }
//!     ]
//!   }]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::models::{DayHours, LocationSchedule, PodKind};

/// 布局校验错误
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to read layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse layout file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Location {location_id}: duplicate pod number {pod}")]
    DuplicatePod { location_id: i64, pod: u32 },

    #[error("Location {location_id}: pod {pod} is paired with missing pod {partner}")]
    MissingPartner {
        location_id: i64,
        pod: u32,
        partner: u32,
    },

    #[error("Location {location_id}: pods {pod} and {partner} are not symmetrically paired")]
    AsymmetricPair {
        location_id: i64,
        pod: u32,
        partner: u32,
    },

    #[error("Location {location_id}: pod {pod} cannot be paired with itself")]
    SelfPaired { location_id: i64, pod: u32 },

    #[error("Location {location_id}: layout has no single pods")]
    NoSinglePods { location_id: i64 },

    #[error("Location {location_id}: invalid time '{value}' for '{day}' (expected HH:MM)")]
    InvalidTime {
        location_id: i64,
        day: String,
        value: String,
    },

    #[error("Location {location_id}: unknown weekday key '{day}'")]
    UnknownWeekday { location_id: i64, day: String },

    #[error("Location {location_id}: open >= close for '{day}'")]
    InvalidHours { location_id: i64, day: String },

    #[error("Duplicate location id {0}")]
    DuplicateLocation(i64),
}

/// 单日营业时间 (布局文件格式, "HH:MM")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayHoursSpec {
    pub open: String,
    pub close: String,
}

/// 营业时间表 (布局文件格式)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSpec {
    /// 以 mon..sun 为键，缺省的星期为闭店日
    pub days: BTreeMap<String, DayHoursSpec>,
    #[serde(default)]
    pub order_open_lead_minutes: u32,
    #[serde(default)]
    pub order_close_cutoff_minutes: u32,
}

/// 餐舱配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodSpec {
    pub number: u32,
    pub kind: PodKind,
}

/// 单个门店配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSpec {
    pub id: i64,
    pub name: String,
    pub schedule: ScheduleSpec,
    pub pods: Vec<PodSpec>,
}

/// 布局文件根结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueLayout {
    pub locations: Vec<LocationSpec>,
}

/// 校验后的门店信息
#[derive(Debug, Clone)]
pub struct LocationInfo {
    pub id: i64,
    pub name: String,
    pub schedule: LocationSchedule,
    pub pods: Vec<PodSpec>,
}

/// 只读门店目录
///
/// 营业时间表是参考数据：闸门每次评估时读取，替换布局只影响后续评估。
#[derive(Debug)]
pub struct VenueDirectory {
    locations: HashMap<i64, LocationInfo>,
}

impl VenueDirectory {
    /// 从布局文件加载；文件不存在时回退到内置演示布局
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            let layout: VenueLayout = serde_json::from_str(&raw)?;
            tracing::info!(path = %path.display(), "Loaded venue layout");
            Self::from_layout(layout)
        } else {
            tracing::warn!(
                path = %path.display(),
                "Layout file not found, using built-in demo layout"
            );
            Self::from_layout(demo_layout())
        }
    }

    /// 校验并构建目录
    pub fn from_layout(layout: VenueLayout) -> Result<Self, LayoutError> {
        let mut locations = HashMap::new();
        for spec in layout.locations {
            validate_pods(spec.id, &spec.pods)?;
            let schedule = build_schedule(spec.id, &spec.schedule)?;
            let info = LocationInfo {
                id: spec.id,
                name: spec.name,
                schedule,
                pods: spec.pods,
            };
            if locations.insert(spec.id, info).is_some() {
                return Err(LayoutError::DuplicateLocation(spec.id));
            }
        }
        Ok(Self { locations })
    }

    pub fn get(&self, location_id: i64) -> Option<&LocationInfo> {
        self.locations.get(&location_id)
    }

    pub fn schedule(&self, location_id: i64) -> Option<&LocationSchedule> {
        self.locations.get(&location_id).map(|l| &l.schedule)
    }

    pub fn location_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.locations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationInfo> {
        self.locations.values()
    }
}

/// 配对校验：partner 存在、对称、非自指；舱号唯一；至少一个单人舱
fn validate_pods(location_id: i64, pods: &[PodSpec]) -> Result<(), LayoutError> {
    let mut by_number: HashMap<u32, &PodSpec> = HashMap::new();
    for pod in pods {
        if by_number.insert(pod.number, pod).is_some() {
            return Err(LayoutError::DuplicatePod {
                location_id,
                pod: pod.number,
            });
        }
    }

    let mut has_single = false;
    for pod in pods {
        match pod.kind {
            PodKind::Single => has_single = true,
            PodKind::DualHalf { partner } => {
                if partner == pod.number {
                    return Err(LayoutError::SelfPaired {
                        location_id,
                        pod: pod.number,
                    });
                }
                let other = by_number
                    .get(&partner)
                    .ok_or(LayoutError::MissingPartner {
                        location_id,
                        pod: pod.number,
                        partner,
                    })?;
                if other.kind.partner() != Some(pod.number) {
                    return Err(LayoutError::AsymmetricPair {
                        location_id,
                        pod: pod.number,
                        partner,
                    });
                }
            }
        }
    }

    if !has_single {
        return Err(LayoutError::NoSinglePods { location_id });
    }
    Ok(())
}

fn build_schedule(location_id: i64, spec: &ScheduleSpec) -> Result<LocationSchedule, LayoutError> {
    const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

    let mut days: [Option<DayHours>; 7] = [None; 7];
    for (day, hours) in &spec.days {
        let idx = WEEKDAYS
            .iter()
            .position(|w| w == day)
            .ok_or_else(|| LayoutError::UnknownWeekday {
                location_id,
                day: day.clone(),
            })?;
        let open = parse_hhmm(location_id, day, &hours.open)?;
        let close = parse_hhmm(location_id, day, &hours.close)?;
        if open >= close {
            return Err(LayoutError::InvalidHours {
                location_id,
                day: day.clone(),
            });
        }
        days[idx] = Some(DayHours { open, close });
    }

    Ok(LocationSchedule {
        days,
        order_open_lead_minutes: spec.order_open_lead_minutes,
        order_close_cutoff_minutes: spec.order_close_cutoff_minutes,
    })
}

fn parse_hhmm(location_id: i64, day: &str, value: &str) -> Result<NaiveTime, LayoutError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| LayoutError::InvalidTime {
        location_id,
        day: day.to_string(),
        value: value.to_string(),
    })
}

/// 内置演示布局：单门店，4 单人舱 + 1 对双人舱
pub fn demo_layout() -> VenueLayout {
    let days: BTreeMap<String, DayHoursSpec> = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"]
        .iter()
        .map(|d| {
            (
                d.to_string(),
                DayHoursSpec {
                    open: "11:00".into(),
                    close: "22:00".into(),
                },
            )
        })
        .collect();

    VenueLayout {
        locations: vec![LocationSpec {
            id: 1,
            name: "Centro".into(),
            schedule: ScheduleSpec {
                days,
                order_open_lead_minutes: 30,
                order_close_cutoff_minutes: 45,
            },
            pods: vec![
                PodSpec {
                    number: 1,
                    kind: PodKind::Single,
                },
                PodSpec {
                    number: 2,
                    kind: PodKind::Single,
                },
                PodSpec {
                    number: 3,
                    kind: PodKind::Single,
                },
                PodSpec {
                    number: 4,
                    kind: PodKind::Single,
                },
                PodSpec {
                    number: 5,
                    kind: PodKind::DualHalf { partner: 6 },
                },
                PodSpec {
                    number: 6,
                    kind: PodKind::DualHalf { partner: 5 },
                },
            ],
        }],
    }
}
