//! enve 主程序入口
//!
//! 设计原则：
//! - 模块化：入口代码简洁，逻辑委托给各模块
//! - 安静模式：默认只输出结果，日志写入 stderr 且默认只显示警告
//! - 退出码：子进程的退出码原样透传，其余错误为 1

use clap::Parser;
use enve::app::Application;
use enve::cli::Cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// 日志过滤环境变量
const LOG_ENV: &str = "ENVE_LOG";

fn main() {
    // 解析 CLI 参数
    let cli = Cli::parse();
    let verbose = cli.verbose;

    init_logging(verbose);

    let result = Application::from_cli(cli).and_then(Application::run);

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            e.report(verbose);
            std::process::exit(e.exit_code());
        }
    }
}

/// 初始化日志：`ENVE_LOG` 优先，否则 verbose 为 debug，默认 warn
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
