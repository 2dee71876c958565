//! 应用程序流程
//!
//! 配置 → 来源解析 → 合并 → 输出（无命令）或执行命令

use crate::cli::Cli;
use crate::config::format;
use crate::core::SourceResolver;
use crate::error::{EnvError, Result};
use crate::types::{EnvironmentSet, OutputFormat, ResolutionConfig};
use crate::utils::env_merge::{EnvMerger, MergeOptions};
use crate::utils::executor::CommandExecutor;
use crate::utils::paths;
use std::io::{self, Write};

/// 一次调用要执行的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 按格式输出合并后的环境
    Print(OutputFormat),
    /// 执行命令
    Exec(Vec<String>),
}

/// 应用程序容器
pub struct Application {
    pub resolution: ResolutionConfig,
    pub action: Action,
}

impl Application {
    /// 由命令行参数创建应用程序实例，并校验工作目录与输出格式
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let resolution = cli.resolution_config();

        if let Some(dir) = &resolution.working_directory {
            paths::validate_dir(dir)?;
        }

        let action = match (cli.output.as_deref(), cli.command.is_empty()) {
            (Some(_), false) => {
                return Err(EnvError::InvalidArgument(
                    "output format cannot be used when executing a command".to_string(),
                ));
            }
            (output, true) => Action::Print(OutputFormat::parse(output.unwrap_or("text"))?),
            (None, false) => Action::Exec(cli.command),
        };

        Ok(Self {
            resolution,
            action,
        })
    }

    /// 解析并合并环境
    pub fn environment(&self) -> Result<EnvironmentSet> {
        let source = SourceResolver::from_process(&self.resolution)?.resolve()?;

        let inherited = if self.resolution.ignore_inherited {
            EnvironmentSet::new()
        } else {
            EnvironmentSet::inherited()
        };

        Ok(EnvMerger::merge(
            inherited,
            source,
            MergeOptions::from(&self.resolution),
        ))
    }

    /// 运行并返回进程退出码
    pub fn run(self) -> Result<i32> {
        let env = self.environment()?;

        match self.action {
            Action::Print(output) => {
                let rendered = format::render(&env, output)?;
                write_output(&mut io::stdout().lock(), &rendered)?;
                Ok(0)
            }
            Action::Exec(command) => CommandExecutor::exec(
                &command,
                &env,
                self.resolution.env_mode(),
                self.resolution.working_directory.as_deref(),
            ),
        }
    }
}

/// 写出结果；stdout 已关闭（如管道下游提前退出）时返回错误而不是 panic
fn write_output(out: &mut impl Write, rendered: &str) -> Result<()> {
    writeln!(out, "{rendered}")
        .and_then(|()| out.flush())
        .map_err(|e| EnvError::io("cannot write to stdout", e))
}
