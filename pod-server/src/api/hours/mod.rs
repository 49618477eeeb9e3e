//! 营业时间 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/hours/{location_id} | GET | 当前下单窗口与有效到店偏移 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/hours/{location_id}", get(handler::hours))
}
