use thiserror::Error;

/// 网格计算与编码过程中的错误
#[derive(Error, Debug)]
pub enum GridError {
    /// 输入参数不合法（数组长度不一致、空的分箱边界、无法识别的原子类型等）
    #[error("参数无效: {0}")]
    InvalidArgument(String),

    /// 编码输出时的 I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GridError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GridError::InvalidArgument(message.into())
    }

    /// 是否属于调用方输入错误（对应 HTTP 400）
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, GridError::InvalidArgument(_))
    }
}

pub type GridResult<T> = Result<T, GridError>;
