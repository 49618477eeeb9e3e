//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单登记与生命周期接口
//! - [`checkin`] - 签到与到舱确认接口
//! - [`pods`] - 餐舱清洁/停用接口
//! - [`board`] - 排队看板接口 (公开，无隐私数据)
//! - [`hours`] - 营业时间接口

pub mod board;
pub mod checkin;
pub mod health;
pub mod hours;
pub mod orders;
pub mod pods;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
