//! 沙特股票指标表格
//!
//! 用法: stock-table "Saudi Aramco, 2010.SR" 1180

use clap::Parser;
use std::process::ExitCode;

use saudi_stocks::client::{render_table, BackendClient, DisplayState, DEFAULT_API_BASE, DEFAULT_INPUT};

#[derive(Debug, Parser)]
#[command(name = "stock-table", about = "Saudi stocks: P/E & ROE", version)]
struct Cli {
    /// 代码或公司名称，逗号分隔；不填使用默认示例
    queries: Vec<String>,

    /// 后端接口地址
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api: String,

    /// 关闭状态列颜色
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let api = match BackendClient::new(&cli.api) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    let input = if cli.queries.is_empty() {
        DEFAULT_INPUT.to_string()
    } else {
        cli.queries.join(",")
    };

    let mut state = DisplayState::new(input);
    eprintln!("Loading…");
    state.submit(&api).await;

    if let Some(error) = state.error {
        eprintln!("{}", error);
        return ExitCode::FAILURE;
    }

    print!("{}", render_table(&state.rows, !cli.no_color));
    ExitCode::SUCCESS
}
