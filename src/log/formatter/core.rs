use crate::log::formatter::FormatError;
use crate::log::log_record::LogRecord;

/// 日志格式化器 trait
///
/// 负责将 LogRecord 编码为一行文本。实现必须无状态，可被多个线程同时调用。
pub trait LogFormatter: Send + Sync {
    /// 格式化日志记录，成功时返回以换行符结尾的完整一行
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError>;
}
