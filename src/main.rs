use clap::Parser;

use stenocoder::{
    cli::{Cli, Commands},
    handler::{handle_decode, handle_encode},
};

/// 程序的主入口点
///
/// 初始化日志 (由 `RUST_LOG` 控制)，解析命令行参数，
/// 并根据子命令（`encode` 或 `decode`）将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 解析命令行参数
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(args) => handle_decode(args),
        Commands::Encode(args) => handle_encode(args),
    }
}
