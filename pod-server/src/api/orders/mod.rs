//! 订单 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | POST | 登记已支付订单 (支付回调边界) |
//! | /api/orders/{order_id} | GET | 订单状态 |
//! | /api/orders/{order_id}/ready | POST | 厨房出餐完成 |
//! | /api/orders/{order_id}/serving | POST | 上餐 |
//! | /api/orders/{order_id}/complete | POST | 完成并释放舱位 |
//! | /api/orders/{order_id}/cancel | POST | 取消 (PREPPING 前) |

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{order_id}", get(handler::get_by_id))
        .route("/{order_id}/ready", post(handler::ready))
        .route("/{order_id}/serving", post(handler::serving))
        .route("/{order_id}/complete", post(handler::complete))
        .route("/{order_id}/cancel", post(handler::cancel))
}
