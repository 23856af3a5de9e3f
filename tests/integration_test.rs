use hongxiu_novel_dl::services::{catalog, chapter_fetcher};
use hongxiu_novel_dl::utils::logging;
use hongxiu_novel_dl::{Config, NovelDownloader, PageRenderer};

const NOVEL_URL: &str = "https://www.hongxiu.com/book/20912433708070004";

#[tokio::test]
#[ignore] // 默认忽略，需要本机有 Chrome 并手动运行：cargo test -- --ignored
async fn test_download_whole_novel() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 下载整本小说
    let downloader = NovelDownloader::new(config);
    let finished = downloader.run(NOVEL_URL).await.expect("下载小说失败");

    assert!(finished, "应该找到章节并完成下载");
}

#[tokio::test]
#[ignore]
async fn test_resolve_novel_info_and_chapters() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 启动目录渲染会话
    let renderer = PageRenderer::launch(&config, "about:blank")
        .await
        .expect("启动无头浏览器失败");

    let info = catalog::resolve_novel_info(&renderer, &config, NOVEL_URL).await;
    println!("书名: {}，作者: {}", info.title, info.author);

    let chapters = catalog::resolve_chapter_list(&renderer, &config, NOVEL_URL).await;
    renderer.close().await;

    let chapters = chapters.expect("解析章节列表失败");
    assert!(!chapters.is_empty(), "正文卷应该至少有一个章节");
}

#[tokio::test]
#[ignore]
async fn test_fetch_single_chapter() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 先从目录里取第一个章节，再抓它的正文
    let renderer = PageRenderer::launch(&config, "about:blank")
        .await
        .expect("启动无头浏览器失败");
    let chapters = catalog::resolve_chapter_list(&renderer, &config, NOVEL_URL).await;
    renderer.close().await;

    let chapters = chapters.expect("解析章节列表失败");
    let first = chapters.first().expect("章节列表不应为空");

    let content = chapter_fetcher::fetch_chapter_content(&config, &first.url)
        .await
        .expect("抓取章节失败");
    assert!(content.is_some(), "应该抓到正文内容");
}
