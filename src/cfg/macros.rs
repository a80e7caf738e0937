//! 注册表相关的宏定义
//!
//! `register_trait` 要求实现类型满足 `From<Config>`，并且 `Box<T>` 能转换为
//! `Box<dyn Trait>`，这里的宏用于生成这两个转换。

/// 为配置类型实现 From trait，调用 `Type::new(config)`
///
/// 用法：`impl_from!(ConfigType => Type)`
#[macro_export]
macro_rules! impl_from {
    ($config_type:ty => $target_type:ty) => {
        impl From<$config_type> for $target_type {
            fn from(config: $config_type) -> Self {
                <$target_type>::new(config)
            }
        }
    };
}

/// 为 Box<T> 类型实现到 Box<dyn Trait> 的转换
///
/// 用法：`impl_box_from!(Type => dyn TraitName)`
#[macro_export]
macro_rules! impl_box_from {
    ($source_type:ty => dyn $trait_name:path) => {
        impl From<Box<$source_type>> for Box<dyn $trait_name> {
            fn from(source: Box<$source_type>) -> Self {
                source as Box<dyn $trait_name>
            }
        }
    };
}
