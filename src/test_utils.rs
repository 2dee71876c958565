//! 测试工具模块
//!
//! 需要修改进程环境的测试通过 `EnvGuard` 自动还原，并配合 `#[serial]` 串行执行

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;

/// 环境变量守卫 - 自动清理
pub struct EnvGuard {
    original_vars: HashMap<OsString, OsString>,
}

impl EnvGuard {
    /// 创建一个新的环境守卫，记录当前环境变量
    pub fn new() -> Self {
        let original_vars = env::vars_os().collect();
        Self { original_vars }
    }

    /// 设置测试环境变量（自动包装为 unsafe）
    pub fn set_var(&self, key: &str, value: &str) {
        unsafe {
            env::set_var(key, value);
        }
    }

    /// 移除环境变量（自动包装为 unsafe）
    pub fn remove_var(&self, key: &str) {
        unsafe {
            env::remove_var(key);
        }
    }

    /// 获取环境变量值
    pub fn get_var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl Drop for EnvGuard {
    /// 释放时恢复原始环境变量
    fn drop(&mut self) {
        // 首先移除所有不在原始环境中的变量
        let current_keys: Vec<OsString> = env::vars_os().map(|(k, _)| k).collect();
        for key in current_keys {
            if !self.original_vars.contains_key(&key) {
                unsafe {
                    env::remove_var(&key);
                }
            }
        }

        // 然后恢复所有原始变量的值
        for (key, value) in &self.original_vars {
            if env::var_os(key).as_ref() != Some(value) {
                unsafe {
                    env::set_var(key, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_guard_basic() {
        let guard = EnvGuard::new();
        guard.set_var("TEST_GUARD_VAR", "test_value");
        assert_eq!(guard.get_var("TEST_GUARD_VAR").as_deref(), Some("test_value"));
    }

    #[test]
    #[serial]
    fn test_env_guard_cleanup() {
        {
            let guard = EnvGuard::new();
            guard.set_var("TEST_CLEANUP_VAR", "cleanup_test");
        }
        // guard 被释放后，变量应该被清理
        assert!(env::var("TEST_CLEANUP_VAR").is_err());
    }

    #[test]
    #[serial]
    fn test_env_guard_restores_removed() {
        unsafe {
            env::set_var("TEST_RESTORE_VAR", "original");
        }
        {
            let guard = EnvGuard::new();
            guard.remove_var("TEST_RESTORE_VAR");
        }
        assert_eq!(env::var("TEST_RESTORE_VAR").as_deref(), Ok("original"));
        unsafe {
            env::remove_var("TEST_RESTORE_VAR");
        }
    }
}
