//! 工具模块 - 错误封装、日志、时间工具
//!
//! - [`AppError`] - HTTP 层统一错误类型
//! - [`AppResponse`] - API 响应结构
//! - [`logger`] - tracing 初始化

pub mod error;
pub mod logger;
pub mod time;

pub use error::{ok, AppError, AppResponse, AppResult};
