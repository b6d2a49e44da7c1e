use clap::Parser;
use tracing::Level;

use bmp_filter::{
    cli::{Cli, Commands},
    handler::{handle_edge, handle_inspect, handle_noise},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令
/// （`inspect`、`edge` 或 `noise`）将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Inspect(args) => handle_inspect(args),
        Commands::Edge(args) => handle_edge(args),
        Commands::Noise(args) => handle_noise(args),
    }
}
