//! 错误处理模块 (修复原则：明确抛出异常)

use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 变量来源，用于错误信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    File(PathBuf),
    Stdin,
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::File(path) => write!(f, "file '{}'", path.display()),
            SourceOrigin::Stdin => write!(f, "stdin"),
        }
    }
}

/// dotenv 内容语法错误：出错字符及其位置
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected {} at line {line}, column {column}", describe_token(.token))]
pub struct ParseError {
    /// `None` 表示行尾意外结束
    pub token: Option<char>,
    /// 行号，从 1 开始
    pub line: usize,
    /// 行内字符偏移，从 0 开始
    pub column: usize,
}

fn describe_token(token: &Option<char>) -> String {
    match token {
        Some(c) => format!("character {c:?}"),
        None => "end of line".to_string(),
    }
}

fn overwrite_suffix(overwrite: &bool) -> &'static str {
    if *overwrite { " (overwrite)" } else { "" }
}

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("cannot access file '{}': {source}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file path '{}' is a directory", .0.display())]
    NotAFile(PathBuf),

    #[error("invalid directory '{}': {reason}", .path.display())]
    InvalidDirectory { path: PathBuf, reason: String },

    #[error("cannot parse env: {0}")]
    Parse(#[from] ParseError),

    #[error("cannot load env from {origin}{}: {source}", overwrite_suffix(.overwrite))]
    EnvLoad {
        origin: SourceOrigin,
        overwrite: bool,
        #[source]
        source: ParseError,
    },

    #[error("executable '{name}' was not found: {reason}")]
    ExecutableNotFound { name: String, reason: String },

    #[error("cannot run command '{name}': {source}")]
    ChildProcess {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command exited with status {code}")]
    ChildExited { code: i32 },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode environment as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// 详细的错误报告函数 (透明原则)
impl EnvError {
    /// 构造带上下文的 IO 错误
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        EnvError::Io {
            context: context.into(),
            source,
        }
    }

    /// 进程退出码：子进程非零退出码原样透传，其余错误统一为 1
    pub fn exit_code(&self) -> i32 {
        match self {
            EnvError::ChildExited { code } => *code,
            _ => 1,
        }
    }

    /// 报告错误，支持详细/安静模式
    /// verbose = true: 详细错误链
    /// verbose = false: 单行信息
    pub fn report(&self, verbose: bool) {
        // 子进程已经自行输出错误信息
        if let EnvError::ChildExited { code } = self {
            tracing::debug!(code, "child process exited with a nonzero status");
            return;
        }

        eprintln!("error: {}", self);

        if verbose {
            let mut current = self.source();
            while let Some(cause) = current {
                eprintln!("  caused by: {}", cause);
                current = cause.source();
            }
        }
    }
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, EnvError>;
