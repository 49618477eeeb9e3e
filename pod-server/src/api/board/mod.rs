//! 排队看板 API 模块
//!
//! 公开轮询接口：大屏和客人手机都可以访问，响应只含短码和舱号，
//! 不含任何客人联系方式。
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/board/{location_id} | GET | 排队看板快照 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/board/{location_id}", get(handler::board))
}
