//! Configuration
//!
//! 静态配置从 TOML 文件与环境变量加载，启动时初始化一次，之后通过
//! `get_config()` 无锁读取。

mod r#impl;
mod structs;

pub use r#impl::{get_config, init_config, init_config_from};
pub use structs::*;
