//! 跨平台命令执行器
//!
//! 所有平台都继承父进程的 stdin/stdout/stderr，子进程的退出码原样透传。

use crate::error::{EnvError, Result};
use crate::types::{EnvMode, EnvironmentSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// 跨平台命令执行器
pub struct CommandExecutor;

impl CommandExecutor {
    /// 执行命令并注入环境变量
    ///
    /// # 参数
    /// - `command`: 命令和参数，如 `["python", "app.py"]`
    /// - `env`: 合并后的环境变量
    /// - `mode`: `Replace` 时子进程只拿到 `env`，`Inherit` 时在继承环境上叠加 `env`
    /// - `working_dir`: 已校验过的工作目录
    ///
    /// # 返回
    /// 子进程退出码为 0 时返回 `Ok(0)`，非零时返回 `EnvError::ChildExited`
    pub fn exec(
        command: &[String],
        env: &EnvironmentSet,
        mode: EnvMode,
        working_dir: Option<&Path>,
    ) -> Result<i32> {
        let (program, args) = command.split_first().ok_or_else(|| {
            EnvError::InvalidArgument("no command was provided".to_string())
        })?;

        let search_path = env
            .get("PATH")
            .map(Into::into)
            .or_else(|| std::env::var_os("PATH"))
            .unwrap_or_default();
        let executable = lookup_executable(program, &search_path)?;

        let mut cmd = Command::new(&executable);
        cmd.args(args);

        if mode == EnvMode::Replace {
            cmd.env_clear();
        }
        cmd.envs(env.iter().map(|v| (v.name.as_str(), v.value.as_str())));

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        // 继承标准流
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        tracing::debug!(
            program = %executable.display(),
            ?mode,
            vars = env.len(),
            "spawning command"
        );

        let status = cmd.status().map_err(|source| EnvError::ChildProcess {
            name: program.clone(),
            source,
        })?;

        match exit_code(status) {
            0 => Ok(0),
            code => Err(EnvError::ChildExited { code }),
        }
    }
}

/// 在搜索路径中查找可执行文件
///
/// - 含路径分隔符的名称直接检查该路径
/// - 单个名称依次在 `search_path` 的各个目录中查找
pub fn lookup_executable(name: &str, search_path: &OsStr) -> Result<PathBuf> {
    let not_found = |reason: String| EnvError::ExecutableNotFound {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(not_found("empty command name".to_string()));
    }

    let path = Path::new(name);
    if path.components().count() > 1 || path.is_absolute() {
        return if is_executable(path) {
            Ok(path.to_path_buf())
        } else {
            Err(not_found(format!("'{}' is not an executable file", name)))
        };
    }

    std::env::split_paths(search_path)
        .map(|dir| {
            // 空目录项表示当前目录
            if dir.as_os_str().is_empty() {
                PathBuf::from(".").join(name)
            } else {
                dir.join(name)
            }
        })
        .flat_map(candidates)
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| not_found("executable file not found in $PATH".to_string()))
}

#[cfg(windows)]
fn candidates(path: PathBuf) -> Vec<PathBuf> {
    let mut out = vec![path.clone()];
    let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    for ext in exts.split(';').filter(|e| !e.is_empty()) {
        let mut with_ext = path.clone().into_os_string();
        with_ext.push(ext);
        out.push(PathBuf::from(with_ext));
    }
    out
}

#[cfg(not(windows))]
fn candidates(path: PathBuf) -> Vec<PathBuf> {
    vec![path]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn system_path() -> std::ffi::OsString {
        std::env::var_os("PATH").unwrap_or_else(|| "/usr/bin:/bin".into())
    }

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_lookup_in_path() {
        let found = lookup_executable("sh", &system_path()).unwrap();
        assert!(found.ends_with("sh"));
    }

    #[test]
    fn test_lookup_missing() {
        let err = lookup_executable("enve-no-such-command", &system_path()).unwrap_err();
        assert!(matches!(err, EnvError::ExecutableNotFound { .. }));
        assert!(err.to_string().contains("executable 'enve-no-such-command' was not found"));
    }

    #[test]
    fn test_lookup_skips_non_executable() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("tool");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();

        assert!(lookup_executable("tool", dir.path().as_os_str()).is_err());

        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(lookup_executable("tool", dir.path().as_os_str()).unwrap(), script);
    }

    #[test]
    fn test_lookup_explicit_path() {
        assert!(lookup_executable("/bin/sh", OsStr::new("")).is_ok());
        assert!(lookup_executable("./definitely-missing", &system_path()).is_err());
    }

    #[test]
    fn test_exec_success() {
        let env = EnvironmentSet::from_pairs([("PATH", system_path().to_string_lossy().into_owned())]);
        let code = CommandExecutor::exec(&sh("exit 0"), &env, EnvMode::Inherit, None).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_exec_mirrors_exit_code() {
        let env = EnvironmentSet::new();
        let err = CommandExecutor::exec(&sh("exit 3"), &env, EnvMode::Inherit, None).unwrap_err();
        assert!(matches!(err, EnvError::ChildExited { code: 3 }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exec_replace_mode_passes_only_resolved_vars() {
        let env = EnvironmentSet::from_pairs([("ONLY_VAR", "yes")]);
        let script = r#"[ "$ONLY_VAR" = yes ] && [ -z "$HOME" ]"#;
        let code = CommandExecutor::exec(&sh(script), &env, EnvMode::Replace, None).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_exec_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("marker"), "").unwrap();

        let env = EnvironmentSet::new();
        let code =
            CommandExecutor::exec(&sh("test -f marker"), &env, EnvMode::Inherit, Some(dir.path()))
                .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_exec_empty_command() {
        let err = CommandExecutor::exec(&[], &EnvironmentSet::new(), EnvMode::Inherit, None)
            .unwrap_err();
        assert!(matches!(err, EnvError::InvalidArgument(_)));
    }
}
