mod core;
mod error;
mod line_formatter;
mod registry;

pub use core::LogFormatter;
pub use error::FormatError;
pub use line_formatter::{
    abbreviate_level, LineFormatter, LineFormatterConfig, DEFAULT_TIMESTAMP_FORMAT,
};
pub use registry::{create_formatter_from_options, register_formatters};
