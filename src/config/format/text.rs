//! 文本格式输出：每行一个 NAME=VALUE

use crate::types::EnvironmentSet;

/// 按集合顺序序列化为 `NAME=VALUE` 行，没有名称的条目被跳过
#[must_use]
pub fn serialize(vars: &EnvironmentSet) -> String {
    vars.iter()
        .filter(|v| !v.name.is_empty())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
