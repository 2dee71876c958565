//! CLI 参数定义

use crate::types::{DEFAULT_ENV_FILE, ResolutionConfig};
use clap::Parser;
use std::path::PathBuf;

/// enve - 在修改后的环境中运行程序
#[derive(Parser, Debug)]
#[command(
    name = "enve",
    version,
    about = "Run a program in a modified environment providing an optional .env file or variables from stdin",
    long_about = None
)]
pub struct Cli {
    /// Load environment variables from a file path [default: .env]
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output environment variables using text, json or xml format [default: text]
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    pub output: Option<String>,

    /// Overwrite environment variables if already set
    #[arg(short = 'w', long = "overwrite")]
    pub overwrite: bool,

    /// Change current working directory
    #[arg(short = 'c', long = "chdir", value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Start a new environment with only variables from the .env file or stdin
    #[arg(short = 'n', long = "new-environment")]
    pub new_environment: bool,

    /// Start with an empty environment, ignoring any existing environment variables
    #[arg(short = 'i', long = "ignore-environment")]
    pub ignore_environment: bool,

    /// Do not load a .env file
    #[arg(short = 'z', long = "no-file")]
    pub no_file: bool,

    /// Read only environment variables from stdin and ignore the .env file
    #[arg(short = 's', long = "stdin")]
    pub stdin: bool,

    /// Enable debug logging and print the full error chain
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Command to execute, followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// 构建环境解析配置
    pub fn resolution_config(&self) -> ResolutionConfig {
        ResolutionConfig {
            file: self
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE)),
            file_explicit: self.file.is_some(),
            stdin: self.stdin,
            no_file: self.no_file,
            overwrite: self.overwrite,
            fresh_environment: self.new_environment,
            ignore_inherited: self.ignore_environment,
            working_directory: self.chdir.clone(),
        }
    }
}
