//! LineFormatter 集成测试

use linefmt::log::{
    create_formatter_from_options, register_formatters, FormatError, LineFormatter,
    LineFormatterConfig, LogFormatter, LogLevel, LogRecord,
};
use linefmt::TypeOptions;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, UNIX_EPOCH};

// ============================================================================
// 辅助函数
// ============================================================================

fn dash_config() -> LineFormatterConfig {
    LineFormatterConfig {
        timestamp_format: "-".to_string(),
        ..Default::default()
    }
}

fn format_line(formatter: &dyn LogFormatter, record: &LogRecord) -> String {
    String::from_utf8(formatter.format(record).unwrap()).unwrap()
}

// ============================================================================
// 测试用例
// ============================================================================

#[test]
fn test_end_to_end_default() {
    let formatter = LineFormatter::new(dash_config());
    let record = LogRecord::new(LogLevel::Debug, "test1");

    assert_eq!(format_line(&formatter, &record), "- [DEBU] test1\n");
}

#[test]
fn test_end_to_end_with_fields() {
    let formatter = LineFormatter::new(LineFormatterConfig {
        show_fields: true,
        sort_fields: true,
        ..dash_config()
    });
    let record = LogRecord::new(LogLevel::Warning, "test3")
        .with_metadata("category", "rest")
        .with_metadata("component", "main");

    assert_eq!(
        format_line(&formatter, &record),
        "- [WARN] [ category:rest, component:main ] test3\n"
    );
}

#[test]
fn test_no_uppercase_level_with_sorted_fields() {
    let formatter = LineFormatter::new(LineFormatterConfig {
        no_uppercase_level: true,
        show_fields: true,
        sort_fields: true,
        ..dash_config()
    });

    let lines: Vec<String> = [
        LogRecord::new(LogLevel::Debug, "test1"),
        LogRecord::new(LogLevel::Info, "test2").with_metadata("component", "main"),
        LogRecord::new(LogLevel::Warning, "test3")
            .with_metadata("component", "main")
            .with_metadata("category", "rest"),
        LogRecord::new(LogLevel::Error, "test4")
            .with_metadata("component", "main")
            .with_metadata("category", "other"),
    ]
    .iter()
    .map(|record| format_line(&formatter, record))
    .collect();

    assert_eq!(
        lines.concat(),
        "- [debu] test1\n\
         - [info] [ component:main ] test2\n\
         - [warn] [ category:rest, component:main ] test3\n\
         - [erro] [ category:other, component:main ] test4\n"
    );
}

#[test]
fn test_message_integrity() {
    let formatter = LineFormatter::new(LineFormatterConfig {
        show_full_level: true,
        ..dash_config()
    });

    for message in ["   test4", "trailing   ", "", "  both  "] {
        let line = format_line(&formatter, &LogRecord::new(LogLevel::Error, message));
        assert_eq!(line, format!("- [ERROR] {}\n", message));
    }
}

#[test]
fn test_optional_segments_absent() {
    let formatter = LineFormatter::new(LineFormatterConfig {
        show_fields: true,
        ..dash_config()
    });

    let line = format_line(&formatter, &LogRecord::new(LogLevel::Info, "plain"));
    assert_eq!(line, "- [INFO] plain\n");
    assert!(!line.contains("[ "));
    assert!(!line.contains(" : "));
}

#[test]
fn test_caller_with_report_caller() {
    let formatter = LineFormatter::new(dash_config());
    let record = LogRecord::new(LogLevel::Debug, "test1").with_location(file!(), line!());

    let line = format_line(&formatter, &record);
    assert!(line.starts_with("- [DEBU] [line_formatter_tests.rs : "));
    assert!(line.ends_with("] test1\n"));
}

#[test]
fn test_determinism() {
    let formatter = LineFormatter::new(LineFormatterConfig {
        timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        show_fields: true,
        utc: true,
        ..Default::default()
    });
    let record = LogRecord::new(LogLevel::Info, "repeatable")
        .with_timestamp(UNIX_EPOCH + Duration::from_millis(1_700_000_000_123))
        .with_location("src/main.rs", 9)
        .with_metadata("z", 1)
        .with_metadata("a", 2.5);

    let first = formatter.format(&record).unwrap();
    for _ in 0..10 {
        assert_eq!(formatter.format(&record).unwrap(), first);
    }
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "2023-11-14 22:13:20.123 [INFO] [main.rs          :   9] [ z:1, a:2.5 ] repeatable\n"
    );
}

#[test]
fn test_concurrent_format() {
    let formatter: Arc<dyn LogFormatter> = Arc::new(LineFormatter::new(LineFormatterConfig {
        show_fields: true,
        sort_fields: true,
        ..dash_config()
    }));

    let handles: Vec<_> = (0..8i64)
        .map(|i| {
            let formatter = Arc::clone(&formatter);
            thread::spawn(move || {
                (0..100)
                    .map(|_| {
                        let record = LogRecord::new(LogLevel::Info, format!("worker {}", i))
                            .with_metadata("worker", i)
                            .with_metadata("category", "pool");
                        formatter.format(&record).unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = format!("- [INFO] [ category:pool, worker:{} ] worker {}\n", i, i);
        for line in handle.join().unwrap() {
            assert_eq!(String::from_utf8(line).unwrap(), expected);
        }
    }
}

#[test]
fn test_invalid_timestamp_format_returns_no_bytes() {
    let formatter = LineFormatter::new(LineFormatterConfig {
        timestamp_format: "%H:%M %".to_string(),
        ..Default::default()
    });

    let result = formatter.format(&LogRecord::new(LogLevel::Info, "msg"));
    assert_eq!(
        result,
        Err(FormatError::InvalidTimestampFormat {
            pattern: "%H:%M %".to_string()
        })
    );
}

#[test]
fn test_formatter_from_type_options() -> anyhow::Result<()> {
    register_formatters()?;

    let opts = TypeOptions::from_json(
        r#"
        {
            type: "LineFormatter",
            options: {
                timestamp_format: "-",
                show_full_level: true,
            }
        }
    "#,
    )?;

    let formatter = create_formatter_from_options(&opts)?;
    assert_eq!(
        format_line(formatter.as_ref(), &LogRecord::new(LogLevel::Warning, "test3")),
        "- [WARNING] test3\n"
    );

    Ok(())
}
