/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a new order ID (UUID v4)
pub fn new_order_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Short display code derived from an order ID.
///
/// Shown on queue boards instead of guest data: first 6 hex chars of the
/// UUID, uppercased.
pub fn display_code(order_id: &str) -> String {
    order_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(6)
        .collect::<String>()
        .to_uppercase()
}
