//! 日志模块
//!
//! 把一条结构化日志记录渲染为一行可读文本。记录的创建、级别过滤和输出
//! 由外部日志框架负责，本模块只做格式化。
//!
//! # 输出格式
//!
//! ```text
//! Jan  2 15:04:05.000 [WARN] [main.rs          :  42] [ category:rest, component:main ] test3
//! ```
//!
//! 依次为时间戳、级别、调用位置（可选）、元数据（可选）和原样输出的消息，以换行符结尾。
//!
//! # 快速开始
//!
//! ```rust
//! use linefmt::log::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config: LineFormatterConfig = json5::from_str(r#"
//!         {
//!             timestamp_format: "-",
//!             show_fields: true,
//!             sort_fields: true,
//!         }
//!     "#)?;
//!     let formatter = LineFormatter::new(config);
//!
//!     let record = LogRecord::new(LogLevel::Warning, "test3")
//!         .with_metadata("component", "main")
//!         .with_metadata("category", "rest");
//!
//!     let line = formatter.format(&record)?;
//!     assert_eq!(line, b"- [WARN] [ category:rest, component:main ] test3\n");
//!     Ok(())
//! }
//! ```

pub mod formatter;
pub mod level;
pub mod log_record;
pub mod tracing_format;

pub use formatter::{
    abbreviate_level, create_formatter_from_options, register_formatters, FormatError,
    LineFormatter, LineFormatterConfig, LogFormatter, DEFAULT_TIMESTAMP_FORMAT,
};
pub use level::LogLevel;
pub use log_record::{Caller, LogRecord, MetadataValue, UNRENDERABLE};
pub use tracing_format::{try_init, LineEventFormat};
