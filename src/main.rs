use clap::Parser;
use log::LevelFilter;

use lsb_carrier::{
    cli::{Cli, Commands},
    handler::{handle_hide, handle_info},
};

/// 程序的主入口点
///
/// 初始化日志 (默认 warn，可用 `RUST_LOG` 调整)，解析命令行参数，
/// 并根据指定的子命令（`info` 或 `hide`）将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Info(args) => handle_info(args).map(|_| ()),
        Commands::Hide(args) => handle_hide(args).map(|_| ()),
    }
}
