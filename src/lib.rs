//! linefmt - 单行文本日志格式化库
//!
//! 将日志记录（时间戳、级别、消息、调用位置、元数据）渲染为一行文本，
//! 作为可插拔的格式化阶段供日志框架使用。
//!
//! ## 模块
//!
//! - **cfg**: 配置管理（TypeOptions 与 trait 注册表）
//! - **log**: 日志记录、级别、格式化器及 tracing 适配
//!
//! ## 设计理念
//!
//! - **无状态**: 格式化器构造后只读，可在多个线程间共享
//! - **确定性**: 相同的记录和配置总是得到相同的输出
//! - **可替换**: 通过 `LogFormatter` trait 与注册表按配置选择实现

pub mod cfg;
pub mod log;

// 重新导出主要的公共 API
pub use cfg::{create_trait_from_type_options, register_trait, TypeOptions};

pub use log::{
    FormatError, LineEventFormat, LineFormatter, LineFormatterConfig, LogFormatter, LogLevel,
    LogRecord, MetadataValue,
};
