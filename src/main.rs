use std::io::{self, Write};

use anyhow::Result;
use hongxiu_novel_dl::utils::logging;
use hongxiu_novel_dl::{Config, NovelDownloader};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    logging::log_startup(config.max_concurrent_chapters);

    // 小说主页地址：优先取命令行参数，否则交互式输入
    let novel_url = match std::env::args().nth(1) {
        Some(url) => url,
        None => prompt_novel_url()?,
    };

    let downloader = NovelDownloader::new(config);
    let finished = downloader.run(novel_url.trim()).await?;

    // 目录解析完全失败时以非零状态退出
    if !finished {
        std::process::exit(1);
    }

    Ok(())
}

fn prompt_novel_url() -> Result<String> {
    print!("请输入小说主页地址 (例如: https://www.hongxiu.com/book/20912433708070004): ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}
