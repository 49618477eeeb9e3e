use chrono_tz::Tz;

/// 服务器配置 - 调度节点的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/pod/edge | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | TIMEZONE | Europe/Madrid | 业务时区 |
/// | LAYOUT_PATH | {WORK_DIR}/layout.json | 门店布局文件 |
/// | DEFAULT_TURNOVER_MINUTES | 35 | 翻台时长初始估值(分钟) |
/// | TURNOVER_WINDOW | 20 | 翻台滚动平均窗口大小 |
/// | NOTIFY_CHANNEL_CAPACITY | 4096 | 生命周期事件通道容量 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pod HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储布局、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 业务时区 (营业时间判定用)
    pub timezone: Tz,
    /// 门店布局文件路径 (为空时使用 {work_dir}/layout.json)
    pub layout_path: Option<String>,
    /// 翻台时长初始估值 (分钟)，滚动平均未热身前使用
    pub default_turnover_minutes: u32,
    /// 翻台滚动平均窗口大小
    pub turnover_window: usize,
    /// 生命周期事件广播通道容量
    pub notify_channel_capacity: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/pod/edge".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(chrono_tz::Europe::Madrid),
            layout_path: std::env::var("LAYOUT_PATH").ok(),
            default_turnover_minutes: std::env::var("DEFAULT_TURNOVER_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(35),
            turnover_window: std::env::var("TURNOVER_WINDOW")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(20),
            notify_channel_capacity: std::env::var("NOTIFY_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4096),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 布局文件路径
    pub fn layout_file(&self) -> std::path::PathBuf {
        match &self.layout_path {
            Some(p) => std::path::PathBuf::from(p),
            None => std::path::Path::new(&self.work_dir).join("layout.json"),
        }
    }
}
