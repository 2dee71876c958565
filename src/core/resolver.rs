//! 环境变量来源解析
//!
//! 优先级：stdin（仅当为管道/文件时）> .env 文件 > 仅继承环境。
//! `--ignore-environment` 在未显式给出 `--file` 或管道 stdin 时得到空来源。

use crate::config::format::dotenv::DotenvParser;
use crate::error::{EnvError, Result, SourceOrigin};
use crate::types::{Resolution, ResolutionConfig, SourceKind};
use crate::utils::paths;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 来源解析器
///
/// stdin 以泛型注入，测试时可以用内存读取器替代进程的标准输入。
pub struct SourceResolver<'a, R> {
    config: &'a ResolutionConfig,
    stdin: R,
    stdin_piped: bool,
}

impl<'a> SourceResolver<'a, std::io::Stdin> {
    /// 使用进程的标准输入
    pub fn from_process(config: &'a ResolutionConfig) -> Result<Self> {
        // 未请求 stdin 时不做任何检查
        let stdin_piped = config.stdin && paths::stdin_is_piped()?;
        Ok(Self::new(config, std::io::stdin(), stdin_piped))
    }
}

impl<'a, R: Read> SourceResolver<'a, R> {
    pub fn new(config: &'a ResolutionConfig, stdin: R, stdin_piped: bool) -> Self {
        Self {
            config,
            stdin,
            stdin_piped,
        }
    }

    /// 确定实际来源并加载变量
    pub fn resolve(mut self) -> Result<Resolution> {
        let config = self.config;

        let source = match config.requested_source() {
            SourceKind::Stdin if self.stdin_piped => {
                if config.file_explicit {
                    tracing::warn!(
                        file = %config.file.display(),
                        "--stdin takes precedence, ignoring --file"
                    );
                }
                let content = self.read_stdin()?;
                return self.load(SourceOrigin::Stdin, &content);
            }
            SourceKind::Stdin => {
                tracing::debug!("stdin is a character device, skipping it");
                config.file_source()
            }
            other => other,
        };

        match source {
            SourceKind::File(path) => {
                let content = read_file(&path)?;
                self.load(SourceOrigin::File(path), &content)
            }
            SourceKind::Stdin | SourceKind::None => {
                tracing::debug!(
                    no_file = config.no_file,
                    ignore_inherited = config.ignore_inherited,
                    "no file to load"
                );
                Ok(Resolution::Skipped)
            }
        }
    }

    fn read_stdin(&mut self) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        self.stdin
            .read_to_end(&mut content)
            .map_err(|e| EnvError::io("cannot read from stdin", e))?;
        Ok(content)
    }

    /// 解析内容；非 fresh 模式下语法错误包装为加载错误
    fn load(&self, origin: SourceOrigin, content: &[u8]) -> Result<Resolution> {
        match DotenvParser::parse(content) {
            Ok(vars) => {
                tracing::debug!(source = %origin, count = vars.len(), "loaded variables");
                Ok(Resolution::Loaded { origin, vars })
            }
            Err(EnvError::Parse(source)) if !self.config.fresh_environment => {
                Err(EnvError::EnvLoad {
                    origin,
                    overwrite: self.config.overwrite,
                    source,
                })
            }
            Err(err) => Err(err),
        }
    }
}

/// 读取 dotenv 文件；文件句柄在函数返回前释放
fn read_file(path: &Path) -> Result<Vec<u8>> {
    paths::validate_file(path)?;

    let mut file = File::open(path).map_err(|source| EnvError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| EnvError::io(format!("cannot read file '{}'", path.display()), e))?;

    Ok(content)
}
