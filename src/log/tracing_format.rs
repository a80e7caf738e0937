//! 将 LogFormatter 接入 tracing-subscriber
//!
//! tracing 负责事件采集、级别过滤和输出，这里只把 `tracing::Event`
//! 转换为 [`LogRecord`] 再交给格式化器。
//!
//! ```rust,no_run
//! use linefmt::log::{LineEventFormat, LineFormatter, LineFormatterConfig};
//!
//! let formatter = LineFormatter::new(LineFormatterConfig {
//!     show_fields: true,
//!     ..Default::default()
//! });
//!
//! tracing_subscriber::fmt()
//!     .event_format(LineEventFormat::new(formatter).with_caller(true))
//!     .init();
//!
//! tracing::info!(component = "web-server", "starting...");
//! ```

use crate::log::formatter::{LineFormatter, LineFormatterConfig, LogFormatter};
use crate::log::level::LogLevel;
use crate::log::log_record::{LogRecord, MetadataValue};
use anyhow::{anyhow, Result};
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_log::NormalizeEvent;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// tracing 事件中消息字段的名称
const MESSAGE_FIELD: &str = "message";

/// log 桥接事件附带的字段前缀，内容已并入规范化后的元数据
const LOG_FIELD_PREFIX: &str = "log.";

/// 基于 LogFormatter 的 tracing 事件格式
///
/// 格式化失败时退回默认配置的 [`LineFormatter`]，保证事件不会丢失。
#[derive(Clone)]
pub struct LineEventFormat {
    formatter: Arc<dyn LogFormatter>,
    fallback: LineFormatter,
    with_caller: bool,
}

impl LineEventFormat {
    pub fn new(formatter: impl LogFormatter + 'static) -> Self {
        Self::from_arc(Arc::new(formatter))
    }

    pub fn from_arc(formatter: Arc<dyn LogFormatter>) -> Self {
        Self {
            formatter,
            fallback: LineFormatter::default(),
            with_caller: false,
        }
    }

    /// 是否把事件的文件和行号作为调用位置输出
    pub fn with_caller(mut self, enabled: bool) -> Self {
        self.with_caller = enabled;
        self
    }

    /// 将 tracing 事件转换为日志记录
    ///
    /// 来自 `log` crate 的事件先按 tracing-log 规范化，取回原始的级别和位置。
    pub fn to_record(&self, event: &Event<'_>) -> LogRecord {
        let normalized = event.normalized_metadata();
        let metadata = normalized.as_ref().unwrap_or_else(|| event.metadata());
        let mut record = LogRecord::new(LogLevel::from(*metadata.level()), String::new());

        if self.with_caller {
            if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                record = record.with_location(file, line);
            }
        }

        event.record(&mut RecordVisitor {
            record: &mut record,
        });
        record
    }

    fn render(&self, record: &LogRecord) -> Result<Vec<u8>, fmt::Error> {
        match self.formatter.format(record) {
            Ok(line) => Ok(line),
            Err(_) => self.fallback.format(record).map_err(|_| fmt::Error),
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineEventFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let record = self.to_record(event);
        let line = self.render(&record)?;
        writer.write_str(std::str::from_utf8(&line).map_err(|_| fmt::Error)?)
    }
}

/// 安装使用 LineFormatter 的全局 tracing subscriber
///
/// 时间戳格式在安装前校验，配置错误只在这里报告一次。
/// 级别过滤读取 `RUST_LOG`，未设置时输出全部级别。
pub fn try_init(config: LineFormatterConfig, with_caller: bool) -> Result<()> {
    let formatter = LineFormatter::new(config);
    formatter.validate()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(LineEventFormat::new(formatter).with_caller(with_caller))
        .try_init()
        .map_err(|err| anyhow!(err))
}

struct RecordVisitor<'a> {
    record: &'a mut LogRecord,
}

impl RecordVisitor<'_> {
    fn push(&mut self, field: &Field, value: MetadataValue) {
        let name = field.name();
        if name == MESSAGE_FIELD {
            self.record.message = value.to_string();
        } else if !name.starts_with(LOG_FIELD_PREFIX) {
            self.record.insert_metadata(name.to_string(), value);
        }
    }
}

impl Visit for RecordVisitor<'_> {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, MetadataValue::I64(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, MetadataValue::U64(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, MetadataValue::F64(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, MetadataValue::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, MetadataValue::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, MetadataValue::String(format!("{:?}", value)));
    }
}
