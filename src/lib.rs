//! enve - 从 .env 文件或 stdin 加载环境变量并运行程序
//!
//! 流程：命令行配置 → 来源解析 → 环境合并 → 输出或执行命令

// 核心数据结构
pub mod types;

// 错误类型
pub mod error;

// 格式解析与输出
pub mod config;

// 来源解析
pub mod core;

// 合并、执行与路径工具
pub mod utils;

// CLI 定义
pub mod cli;

// 应用程序流程
pub mod app;

#[cfg(test)]
pub(crate) mod test_utils;

// 重新导出常用类型
pub use error::{EnvError, ParseError, Result, SourceOrigin};
pub use types::{EnvMode, EnvironmentSet, EnvironmentVariable, OutputFormat, Resolution, ResolutionConfig};
