use thiserror::Error;

/// 格式化错误
///
/// 只有时间戳格式无法应用时才会出现，此时不产生任何输出。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("无效的时间戳格式: '{pattern}'")]
    InvalidTimestampFormat { pattern: String },
}

impl FormatError {
    pub(crate) fn invalid_timestamp_format(pattern: &str) -> Self {
        FormatError::InvalidTimestampFormat {
            pattern: pattern.to_string(),
        }
    }
}
