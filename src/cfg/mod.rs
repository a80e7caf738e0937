//! cfg 模块 - 配置管理
//!
//! 通过 `TypeOptions` 描述"类型名 + 选项"，配合 trait 注册表在运行时构造组件。

mod macros;
pub mod registry;
pub mod type_options;

pub use registry::{create_trait_from_type_options, register_trait};
pub use type_options::TypeOptions;
