//! 环境变量合并器
//!
//! 两个独立开关决定合并方式：
//! - fresh: 结果只包含解析出的变量，忽略继承环境（重复键取最后一个）
//! - 非 fresh + overwrite: 解析出的变量覆盖继承值（重复键取最后一个）
//! - 非 fresh 无 overwrite: 仅补充缺失的变量（重复键取第一个）
//!
//! 合并只作用于显式传入的快照，不修改进程的全局环境。

use crate::types::{EnvironmentSet, Resolution, ResolutionConfig};

/// 合并选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub overwrite: bool,
    pub fresh_environment: bool,
}

impl From<&ResolutionConfig> for MergeOptions {
    fn from(config: &ResolutionConfig) -> Self {
        Self {
            overwrite: config.overwrite,
            fresh_environment: config.fresh_environment,
        }
    }
}

/// 环境变量合并器
pub struct EnvMerger;

impl EnvMerger {
    /// 把解析结果合并进继承环境快照
    ///
    /// # 参数
    /// - `inherited`: 继承环境快照，`--ignore-environment` 时为空
    /// - `resolution`: 来源解析结果
    /// - `options`: overwrite / fresh 开关
    pub fn merge(
        inherited: EnvironmentSet,
        resolution: Resolution,
        options: MergeOptions,
    ) -> EnvironmentSet {
        let parsed = match resolution {
            Resolution::Loaded { vars, .. } => vars,
            Resolution::Skipped => Vec::new(),
        };

        if options.fresh_environment {
            return EnvironmentSet::from_pairs(parsed);
        }

        let mut env = inherited;
        let mut applied = 0usize;
        for (key, value) in parsed {
            if options.overwrite {
                env.insert(key, value);
                applied += 1;
            } else if env.insert_if_absent(key, value) {
                applied += 1;
            }
        }

        tracing::debug!(
            applied,
            total = env.len(),
            overwrite = options.overwrite,
            "merged variables into inherited environment"
        );
        env
    }
}
