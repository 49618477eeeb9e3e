use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Layout error: {0}")]
    Layout(#[from] crate::venue::LayoutError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 核心模块的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
