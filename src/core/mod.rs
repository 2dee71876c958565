//! 核心流程：来源解析

pub mod resolver;

pub use resolver::SourceResolver;
