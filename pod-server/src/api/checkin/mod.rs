//! 签到 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/checkin | POST | 到店签到：分配舱位或排队 |
//! | /api/checkin/{order_id}/confirm | POST | 到舱确认 (扫码)，厨房开工 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/checkin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::check_in))
        .route("/{order_id}/confirm", post(handler::confirm))
}
