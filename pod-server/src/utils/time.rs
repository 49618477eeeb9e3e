//! 时间工具函数
//!
//! 调度核心内部只使用 `i64` Unix millis；格式化统一在 HTTP 边界完成。

use chrono::DateTime;
use chrono_tz::Tz;

/// Unix millis → 业务时区的 RFC3339，非法时间戳返回 None
pub fn millis_to_local_rfc3339(millis: i64, tz: Tz) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&tz).to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_conversion_applies_offset() {
        // 2025-06-10 12:00 UTC = 14:00 in Madrid (CEST)
        let millis = 1_749_556_800_000;
        let local = millis_to_local_rfc3339(millis, chrono_tz::Europe::Madrid).unwrap();
        assert!(local.starts_with("2025-06-10T14:00:00"));
    }

    #[test]
    fn test_invalid_timestamp_is_none() {
        assert!(millis_to_local_rfc3339(i64::MAX, chrono_tz::UTC).is_none());
    }
}
