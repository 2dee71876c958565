//! 核心数据结构定义 (表达原则：用数据结构表达逻辑)

use crate::error::{EnvError, Result, SourceOrigin};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

/// 默认的 dotenv 文件路径
pub const DEFAULT_ENV_FILE: &str = ".env";

/// 环境变量条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

impl EnvironmentVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// 变量名是否合法：非空、不含 `=` 与 NUL
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && !name.contains(['=', '\0'])
    }
}

impl fmt::Display for EnvironmentVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// 有序的环境变量集合，变量名唯一
///
/// 替换已有变量时保持其原位置，新变量追加到末尾。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSet {
    vars: Vec<EnvironmentVariable>,
    /// 进程环境中存在但无法表示为 UTF-8 的变量名，不输出，但视为已存在
    opaque: HashSet<OsString>,
}

impl EnvironmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前进程环境的快照
    ///
    /// 只收录可表示为 UTF-8 且名称合法的条目。其余条目只记下名称：
    /// 它们仍会被子进程继承，不参与输出，且不会被非 overwrite 的合并覆盖。
    pub fn inherited() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// 由平台原始的键值对构建，无法表示的条目记为 opaque
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut set = Self::new();
        for (key, value) in pairs {
            let name = key
                .to_str()
                .filter(|name| EnvironmentVariable::is_valid_name(name))
                .map(str::to_string);
            match (name, value.into_string()) {
                (Some(name), Ok(value)) => {
                    set.insert(name, value);
                }
                _ => {
                    tracing::debug!(?key, "skipping non-representable inherited variable");
                    set.opaque.insert(key);
                }
            }
        }
        set
    }

    /// 按源顺序构建，重复键后者覆盖前者
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.insert(name, value);
        }
        set
    }

    /// 插入或替换，返回被替换的旧值
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        self.opaque.remove(OsStr::new(&name));
        match self.position(&name) {
            Some(idx) => Some(std::mem::replace(&mut self.vars[idx].value, value)),
            None => {
                self.vars.push(EnvironmentVariable { name, value });
                None
            }
        }
    }

    /// 仅当变量不存在时插入，返回是否插入
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) || self.is_opaque(&name) {
            return false;
        }
        self.vars.push(EnvironmentVariable::new(name, value));
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.vars[idx].value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// 变量存在于进程环境，但值或名称不是 UTF-8
    pub fn is_opaque(&self, name: impl AsRef<OsStr>) -> bool {
        self.opaque.contains(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnvironmentVariable> {
        self.vars.iter()
    }

    pub fn as_slice(&self) -> &[EnvironmentVariable] {
        &self.vars
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|v| v.name == name)
    }
}

impl<'a> IntoIterator for &'a EnvironmentSet {
    type Item = &'a EnvironmentVariable;
    type IntoIter = std::slice::Iter<'a, EnvironmentVariable>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

/// 请求的变量来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    File(PathBuf),
    Stdin,
    None,
}

/// 解析结果：已加载的变量，或跳过了文件/stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Loaded {
        origin: SourceOrigin,
        vars: Vec<(String, String)>,
    },
    Skipped,
}

/// 环境解析配置，每次调用由命令行参数构建一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    pub file: PathBuf,
    /// 是否显式指定了 --file
    pub file_explicit: bool,
    pub stdin: bool,
    pub no_file: bool,
    pub overwrite: bool,
    pub fresh_environment: bool,
    pub ignore_inherited: bool,
    pub working_directory: Option<PathBuf>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_ENV_FILE),
            file_explicit: false,
            stdin: false,
            no_file: false,
            overwrite: false,
            fresh_environment: false,
            ignore_inherited: false,
            working_directory: None,
        }
    }
}

impl ResolutionConfig {
    /// 由标志推导出请求的来源
    pub fn requested_source(&self) -> SourceKind {
        if self.stdin {
            SourceKind::Stdin
        } else {
            self.file_source()
        }
    }

    /// 不考虑 stdin 时的来源：stdin 不是管道时退回到这里
    pub fn file_source(&self) -> SourceKind {
        if self.no_file || (self.ignore_inherited && !self.file_explicit) {
            SourceKind::None
        } else {
            SourceKind::File(self.file.clone())
        }
    }

    /// 子进程环境是否完全由解析结果替换
    pub fn env_mode(&self) -> EnvMode {
        if self.fresh_environment || self.ignore_inherited {
            EnvMode::Replace
        } else {
            EnvMode::Inherit
        }
    }
}

/// 子进程环境的构建方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    /// 继承父进程环境，并叠加合并结果
    Inherit,
    /// 清空继承的环境，只使用合并结果
    Replace,
}

/// 输出格式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Xml,
}

impl OutputFormat {
    /// 从字符串解析，空值和未知格式分别报错
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            "" => Err(EnvError::InvalidArgument(
                "output format was empty or not provided".to_string(),
            )),
            other => Err(EnvError::InvalidArgument(format!(
                "output format '{}' is not supported",
                other
            ))),
        }
    }
}
