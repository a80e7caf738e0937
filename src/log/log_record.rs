use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

pub use crate::log::level::LogLevel;

/// 元数据值无法渲染时使用的占位文本
pub const UNRENDERABLE: &str = "<unrenderable>";

/// 元数据值，支持多种类型
#[derive(Clone)]
pub enum MetadataValue {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Null,
    /// 任意 JSON 兼容的数据
    Json(Value),
    /// 自定义结构体（内部序列化为 JSON）
    Struct(Value),
    /// 任意可显示的值，渲染时调用其 Display 实现
    Display(Arc<dyn fmt::Display + Send + Sync>),
}

impl fmt::Debug for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => f.debug_tuple("String").field(s).finish(),
            MetadataValue::I64(n) => f.debug_tuple("I64").field(n).finish(),
            MetadataValue::U64(n) => f.debug_tuple("U64").field(n).finish(),
            MetadataValue::F64(n) => f.debug_tuple("F64").field(n).finish(),
            MetadataValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            MetadataValue::Null => f.write_str("Null"),
            MetadataValue::Json(v) => f.debug_tuple("Json").field(v).finish(),
            MetadataValue::Struct(v) => f.debug_tuple("Struct").field(v).finish(),
            MetadataValue::Display(_) => f.write_str("Display(..)"),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => f.write_str(s),
            MetadataValue::I64(n) => write!(f, "{}", n),
            MetadataValue::U64(n) => write!(f, "{}", n),
            MetadataValue::F64(n) => write!(f, "{}", n),
            MetadataValue::Bool(b) => write!(f, "{}", b),
            MetadataValue::Null => f.write_str("null"),
            MetadataValue::Json(v) => write!(f, "{}", v),
            MetadataValue::Struct(v) => write!(f, "{}", v),
            MetadataValue::Display(d) => write!(f, "{}", d),
        }
    }
}

impl MetadataValue {
    /// 从任意实现了 Serialize 的自定义结构体创建 MetadataValue
    ///
    /// 序列化失败时退化为 [`UNRENDERABLE`] 占位文本。
    ///
    /// ```ignore
    /// #[derive(Serialize)]
    /// struct User {
    ///     id: i64,
    ///     name: String,
    /// }
    ///
    /// let value = MetadataValue::from_struct(User { id: 123, name: "alice".to_string() });
    /// ```
    pub fn from_struct<T: serde::Serialize>(value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(json_value) => MetadataValue::Struct(json_value),
            Err(_) => MetadataValue::String(UNRENDERABLE.to_string()),
        }
    }

    /// 包装任意实现了 Display 的值
    pub fn display<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        MetadataValue::Display(Arc::new(value))
    }

    /// 将值的文本形式追加到 buffer
    ///
    /// Display 实现返回错误时丢弃已写入的部分，改写为 [`UNRENDERABLE`]。
    pub fn render_to(&self, buffer: &mut String) {
        use std::fmt::Write;

        let start = buffer.len();
        if write!(buffer, "{}", self).is_err() {
            buffer.truncate(start);
            buffer.push_str(UNRENDERABLE);
        }
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::String(s)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        MetadataValue::I64(n)
    }
}

impl From<i32> for MetadataValue {
    fn from(n: i32) -> Self {
        MetadataValue::I64(n as i64)
    }
}

impl From<u64> for MetadataValue {
    fn from(n: u64) -> Self {
        MetadataValue::U64(n)
    }
}

impl From<u32> for MetadataValue {
    fn from(n: u32) -> Self {
        MetadataValue::U64(n as u64)
    }
}

impl From<f64> for MetadataValue {
    fn from(n: f64) -> Self {
        MetadataValue::F64(n)
    }
}

impl From<f32> for MetadataValue {
    fn from(n: f32) -> Self {
        MetadataValue::F64(n as f64)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Bool(b)
    }
}

impl From<Value> for MetadataValue {
    fn from(v: Value) -> Self {
        MetadataValue::Json(v)
    }
}

/// 调用位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// 源文件路径
    pub file: String,
    /// 行号
    pub line: u32,
}

/// 日志记录
///
/// 由日志框架构造，格式化器只读取。
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// 日志级别
    pub level: LogLevel,
    /// 日志消息，原样输出
    pub message: String,
    /// 时间戳
    pub timestamp: SystemTime,
    /// 调用位置，未开启采集时为 None
    pub caller: Option<Caller>,
    /// 自定义元数据，按添加顺序保存，键唯一
    pub metadata: Vec<(String, MetadataValue)>,
}

impl LogRecord {
    /// 创建新的日志记录，时间戳取当前时间
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: SystemTime::now(),
            caller: None,
            metadata: Vec::new(),
        }
    }

    /// 设置时间戳
    pub fn with_timestamp(mut self, timestamp: impl Into<SystemTime>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// 设置位置信息（文件和行号）
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.caller = Some(Caller {
            file: file.into(),
            line,
        });
        self
    }

    /// 添加元数据
    ///
    /// 已存在同名键时原地替换值，保持首次出现的位置。
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> Self {
        self.insert_metadata(key.into(), value.into());
        self
    }

    /// 批量添加元数据
    pub fn with_metadatas<K, V>(mut self, metadata: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        for (key, value) in metadata {
            self.insert_metadata(key.into(), value.into());
        }
        self
    }

    pub(crate) fn insert_metadata(&mut self, key: String, value: MetadataValue) {
        match self.metadata.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.metadata.push((key, value)),
        }
    }
}
