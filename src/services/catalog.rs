//! 目录解析服务 - 业务能力层
//!
//! 复用调用方持有的长生命周期渲染会话，解析小说元信息与有序章节目录。
//! 元信息解析永不失败（缺失时退回占位值）；目录解析找不到正文卷时
//! 返回空列表并记录错误，由上层决定是否中止。

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::PageRenderer;
use crate::models::{Chapter, NovelInfo};

/// 正文卷标题标记，用于区分正文与番外等附加分卷
const MAIN_SECTION_MARKER: &str = "正文卷";

/// 小说标题选择器
const TITLE_SELECTOR: &str = "h1.book-title";
/// 作者选择器
const AUTHOR_SELECTOR: &str = "p.info-list span.book-author";

/// 解析小说元信息（标题与作者）
///
/// 等待标题元素最多 `info_wait_secs` 秒；超时或任何解析失败都不会
/// 中止运行，而是退回占位值。
pub async fn resolve_novel_info(
    renderer: &PageRenderer,
    config: &Config,
    novel_url: &str,
) -> NovelInfo {
    if let Err(e) = renderer.navigate(novel_url).await {
        error!("获取小说信息出错 {}: {}", novel_url, e);
        return NovelInfo::unknown();
    }

    let wait = Duration::from_secs(config.info_wait_secs);
    if renderer.wait_for_element(TITLE_SELECTOR, wait).await {
        debug!("小说标题元素已找到，页面已渲染");
    } else {
        warn!("等待小说标题元素超时，可能小说主页结构已更改，继续尽力解析");
    }

    match renderer.html().await {
        Ok(html) => parse_novel_info(&html),
        Err(e) => {
            error!("获取小说信息出错 {}: {}", novel_url, e);
            NovelInfo::unknown()
        }
    }
}

/// 解析有序章节目录
///
/// 从小说主页地址推导章节列表页地址，等待列表容器最多
/// `catalog_wait_secs` 秒后解析。返回目录页文档顺序的章节列表，
/// 该顺序是最终输出的唯一权威顺序。
pub async fn resolve_chapter_list(
    renderer: &PageRenderer,
    config: &Config,
    novel_url: &str,
) -> Result<Vec<Chapter>> {
    let listing_url = chapterlist_url(&config.base_url, novel_url);
    renderer.navigate(&listing_url).await?;

    let wait = Duration::from_secs(config.catalog_wait_secs);
    if renderer.wait_for_element("div.volume", wait).await {
        debug!("章节列表元素已找到，页面已渲染");
    } else {
        warn!("等待章节列表元素超时，可能页面未完全加载");
    }

    let html = renderer.html().await?;
    let chapters = parse_chapter_list(&html, &config.base_url);
    info!("章节数: {}", chapters.len());
    Ok(chapters)
}

/// 从小说主页地址推导章节列表页地址
pub fn chapterlist_url(base_url: &str, novel_url: &str) -> String {
    let novel_id = novel_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    format!("{}/chapterlist/{}", base_url, novel_id)
}

/// 从渲染后的小说主页 HTML 中解析元信息
pub fn parse_novel_info(html: &str) -> NovelInfo {
    let document = Html::parse_document(html);
    let sentinel = NovelInfo::unknown();
    NovelInfo {
        title: select_text(&document, TITLE_SELECTOR).unwrap_or(sentinel.title),
        author: select_text(&document, AUTHOR_SELECTOR).unwrap_or(sentinel.author),
    }
}

/// 从渲染后的章节列表页 HTML 中解析章节目录
///
/// 在所有分卷中选出标题包含"正文卷"的那一卷（取第一个匹配），
/// 卷内按文档顺序提取所有章节链接；找不到正文卷时返回空列表。
pub fn parse_chapter_list(html: &str, base_url: &str) -> Vec<Chapter> {
    let (Ok(volume_sel), Ok(heading_sel), Ok(link_sel)) = (
        Selector::parse("div.volume"),
        Selector::parse("h3"),
        Selector::parse("ul.cf li a"),
    ) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);

    let main_volume = document.select(&volume_sel).find(|volume| {
        volume
            .select(&heading_sel)
            .next()
            .map(|h3| h3.text().collect::<String>().contains(MAIN_SECTION_MARKER))
            .unwrap_or(false)
    });

    let Some(volume) = main_volume else {
        error!("未找到包含'{}'的章节列表区域!", MAIN_SECTION_MARKER);
        return Vec::new();
    };

    let mut chapters = Vec::new();
    for link in volume.select(&link_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let title = link.text().collect::<String>().trim().to_string();
        chapters.push(Chapter::new(format!("{}{}", base_url, href), title));
    }
    chapters
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let element = document.select(&sel).next()?;
    let text = element.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}
