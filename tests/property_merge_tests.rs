//! 合并规则的属性测试
//!
//! 对任意生成的继承环境与解析结果验证：
//! - 无 overwrite：继承值保持不变，缺失的变量取第一次出现的值
//! - overwrite：结果为并集，解析出的变量取最后一次出现的值
//! - fresh：结果只取决于解析结果，与继承环境无关

use enve::utils::env_merge::{EnvMerger, MergeOptions};
use enve::{EnvironmentSet, Resolution, SourceOrigin};
use proptest::prelude::*;
use std::collections::HashMap;

/// 变量名取自很小的字母表，使继承环境与解析结果经常重名
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-D][A-D_]{0,1}".prop_map(String::from)
}

/// 值包含需要在输出中转义的字符
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 <>&\"'=\\n\\r\\t]{0,12}".prop_map(String::from)
}

fn pairs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((name_strategy(), value_strategy()), 0..8)
}

fn loaded(pairs: &[(String, String)]) -> Resolution {
    Resolution::Loaded {
        origin: SourceOrigin::Stdin,
        vars: pairs.to_vec(),
    }
}

proptest! {
    #[test]
    fn prop_without_overwrite_preserves_inherited(
        ambient in pairs_strategy(),
        parsed in pairs_strategy(),
    ) {
        let inherited = EnvironmentSet::from_pairs(ambient);
        let result = EnvMerger::merge(inherited.clone(), loaded(&parsed), MergeOptions::default());

        for var in &inherited {
            prop_assert_eq!(result.get(&var.name), Some(var.value.as_str()));
        }

        let mut first: HashMap<&str, &str> = HashMap::new();
        for (name, value) in &parsed {
            first.entry(name.as_str()).or_insert(value.as_str());
        }
        for (name, value) in first {
            if !inherited.contains(name) {
                prop_assert_eq!(result.get(name), Some(value));
            }
        }
    }

    #[test]
    fn prop_with_overwrite_is_union_with_source_winning(
        ambient in pairs_strategy(),
        parsed in pairs_strategy(),
    ) {
        let inherited = EnvironmentSet::from_pairs(ambient);
        let options = MergeOptions { overwrite: true, fresh_environment: false };
        let result = EnvMerger::merge(inherited.clone(), loaded(&parsed), options);

        let last: HashMap<&str, &str> = parsed
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        for var in &inherited {
            let expected = last.get(var.name.as_str()).copied().unwrap_or(var.value.as_str());
            prop_assert_eq!(result.get(&var.name), Some(expected));
        }
        for (name, value) in &last {
            prop_assert_eq!(result.get(name), Some(*value));
        }

        let union = inherited
            .iter()
            .filter(|var| !last.contains_key(var.name.as_str()))
            .count()
            + last.len();
        prop_assert_eq!(result.len(), union);
    }

    #[test]
    fn prop_fresh_ignores_ambient_state(
        first_ambient in pairs_strategy(),
        second_ambient in pairs_strategy(),
        parsed in pairs_strategy(),
        overwrite in any::<bool>(),
    ) {
        let options = MergeOptions { overwrite, fresh_environment: true };

        let a = EnvMerger::merge(EnvironmentSet::from_pairs(first_ambient), loaded(&parsed), options);
        let b = EnvMerger::merge(EnvironmentSet::from_pairs(second_ambient), loaded(&parsed), options);

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a, EnvironmentSet::from_pairs(parsed));
    }
}
