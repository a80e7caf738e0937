use crate::log::formatter::{FormatError, LogFormatter};
use crate::log::level::LogLevel;
use crate::log::log_record::{Caller, LogRecord, MetadataValue};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use smart_default::SmartDefault;
use std::borrow::Cow;
use std::fmt::Write;
use std::path::Path;
use std::time::SystemTime;

/// 默认时间戳格式，形如 `Jan  2 15:04:05.000`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%b %e %H:%M:%S%.3f";

/// 级别缩写长度
const LEVEL_ABBREVIATION_LEN: usize = 4;

/// LineFormatter 配置
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct LineFormatterConfig {
    /// 时间戳格式（chrono strftime 语法），为空时使用 [`DEFAULT_TIMESTAMP_FORMAT`]
    pub timestamp_format: String,

    /// 输出完整级别 `[WARNING]`，而不是 `[WARN]`
    #[default = false]
    pub show_full_level: bool,

    /// 级别保持原生大小写，不转大写
    #[default = false]
    pub no_uppercase_level: bool,

    /// 输出元数据块
    #[default = false]
    pub show_fields: bool,

    /// 元数据按键名排序，否则保持添加顺序
    #[default = false]
    pub sort_fields: bool,

    /// 以 UTC 渲染时间戳，否则使用本地时区
    #[default = false]
    pub utc: bool,
}

/// 单行文本格式化器
///
/// 输出格式：
///
/// ```text
/// <timestamp> [<LEVEL>] [<file> : <line>] [ k1:v1, k2:v2 ] <message>\n
/// ```
///
/// 调用位置和元数据块是可选的，缺失时整段省略。
///
/// 时间戳格式在构造时校验一次，之后每次格式化直接复用校验结果。
#[derive(Debug, Clone)]
pub struct LineFormatter {
    config: LineFormatterConfig,
    timestamp_check: Result<(), FormatError>,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(LineFormatterConfig::default())
    }
}

impl LineFormatter {
    pub fn new(config: LineFormatterConfig) -> Self {
        let pattern = if config.timestamp_format.is_empty() {
            DEFAULT_TIMESTAMP_FORMAT
        } else {
            config.timestamp_format.as_str()
        };
        let timestamp_check = check_timestamp_format(pattern);
        Self {
            config,
            timestamp_check,
        }
    }

    pub fn config(&self) -> &LineFormatterConfig {
        &self.config
    }

    /// 实际生效的时间戳格式
    pub fn timestamp_format(&self) -> &str {
        if self.config.timestamp_format.is_empty() {
            DEFAULT_TIMESTAMP_FORMAT
        } else {
            &self.config.timestamp_format
        }
    }

    /// 预先检查时间戳格式，便于调用方在启动时一次性报告配置错误
    pub fn validate(&self) -> Result<(), FormatError> {
        self.timestamp_check.clone()
    }

    /// 格式化为字符串，内容与 [`LogFormatter::format`] 相同
    pub fn format_to_string(&self, record: &LogRecord) -> Result<String, FormatError> {
        let metadata_len: usize = if self.config.show_fields {
            record.metadata.iter().map(|(k, _)| k.len() + 16).sum()
        } else {
            0
        };
        let capacity = 48 + record.message.len() + metadata_len;
        let mut result = String::with_capacity(capacity);

        self.write_timestamp(&mut result, record.timestamp)?;

        result.push_str(" [");
        self.write_level(&mut result, record.level);
        result.push_str("] ");

        if let Some(caller) = &record.caller {
            write_caller(&mut result, caller);
        }

        if self.config.show_fields {
            write_fields(&mut result, &record.metadata, self.config.sort_fields);
        }

        result.push_str(&record.message);
        result.push('\n');

        Ok(result)
    }

    fn write_timestamp(&self, buffer: &mut String, time: SystemTime) -> Result<(), FormatError> {
        self.validate()?;
        let pattern = self.timestamp_format();

        let written = if self.config.utc {
            let time: DateTime<Utc> = time.into();
            write!(buffer, "{}", time.format(pattern))
        } else {
            let time: DateTime<Local> = time.into();
            write!(buffer, "{}", time.format(pattern))
        };

        written.map_err(|_| FormatError::invalid_timestamp_format(pattern))
    }

    fn write_level(&self, buffer: &mut String, level: LogLevel) {
        let text = if self.config.no_uppercase_level {
            Cow::Borrowed(level.as_str())
        } else {
            Cow::Owned(level.as_str().to_uppercase())
        };

        if self.config.show_full_level {
            buffer.push_str(&text);
        } else {
            buffer.push_str(abbreviate_level(&text));
        }
    }
}

impl LogFormatter for LineFormatter {
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError> {
        self.format_to_string(record).map(String::into_bytes)
    }
}

/// 取级别文本的前 4 个字符，不足 4 个字符时原样返回
pub fn abbreviate_level(level: &str) -> &str {
    match level.char_indices().nth(LEVEL_ABBREVIATION_LEN) {
        Some((idx, _)) => &level[..idx],
        None => level,
    }
}

fn check_timestamp_format(pattern: &str) -> Result<(), FormatError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::invalid_timestamp_format(pattern));
    }
    Ok(())
}

fn write_caller(buffer: &mut String, caller: &Caller) {
    let file_name = Path::new(&caller.file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(caller.file.as_str());

    // 写入 String 不会失败
    let _ = write!(buffer, "[{:<16} : {:>3}] ", file_name, caller.line);
}

fn write_fields(buffer: &mut String, metadata: &[(String, MetadataValue)], sort: bool) {
    if metadata.is_empty() {
        return;
    }

    let mut fields: Vec<&(String, MetadataValue)> = metadata.iter().collect();
    if sort {
        fields.sort_by(|a, b| a.0.cmp(&b.0));
    }

    buffer.push_str("[ ");
    for (idx, (key, value)) in fields.into_iter().enumerate() {
        if idx > 0 {
            buffer.push_str(", ");
        }
        buffer.push_str(key);
        buffer.push(':');
        value.render_to(buffer);
    }
    buffer.push_str(" ] ");
}

crate::impl_from!(LineFormatterConfig => LineFormatter);
crate::impl_box_from!(LineFormatter => dyn LogFormatter);
