// TypeOptions 序列化相关实现

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 类型选项结构
///
/// `type` 指定注册表中的实现名称，`options` 是该实现的配置。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeOptions {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "empty_options")]
    pub options: JsonValue,
}

fn empty_options() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

impl TypeOptions {
    /// 从 JSON 字符串创建 TypeOptions（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建 TypeOptions
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建 TypeOptions
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json5_support() -> Result<()> {
        let json5_str = r#"
        {
            // 注释
            "type": "LineFormatter",
            "options": {
                timestamp_format: "-",  // 未引用的键
                show_fields: true,      // 尾随逗号
            }
        }"#;

        let type_options = TypeOptions::from_json(json5_str)?;
        assert_eq!(type_options.type_name, "LineFormatter");
        assert_eq!(type_options.options["timestamp_format"], "-");
        assert_eq!(type_options.options["show_fields"], true);

        Ok(())
    }

    #[test]
    fn test_yaml_support() -> Result<()> {
        let yaml_str = r#"
type: LineFormatter
options:
  sort_fields: true
"#;

        let type_options = TypeOptions::from_yaml(yaml_str)?;
        assert_eq!(type_options.type_name, "LineFormatter");
        assert_eq!(type_options.options["sort_fields"], true);

        Ok(())
    }

    #[test]
    fn test_toml_support() -> Result<()> {
        let toml_str = r#"
type = "LineFormatter"

[options]
show_full_level = true
"#;

        let type_options = TypeOptions::from_toml(toml_str)?;
        assert_eq!(type_options.type_name, "LineFormatter");
        assert_eq!(type_options.options["show_full_level"], true);

        Ok(())
    }

    #[test]
    fn test_missing_options() -> Result<()> {
        let type_options = TypeOptions::from_json(r#"{ "type": "LineFormatter" }"#)?;
        assert!(type_options.options.is_object());
        assert!(type_options.options.as_object().unwrap().is_empty());

        Ok(())
    }

    #[test]
    fn test_invalid_json_error() {
        let invalid_json = r#"
        {
            "type": "invalid_test",
            "options": {
                "unclosed": "quote
            }
        }"#;

        assert!(TypeOptions::from_json(invalid_json).is_err());
    }
}
