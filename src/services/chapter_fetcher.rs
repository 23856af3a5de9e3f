//! 章节抓取服务 - 业务能力层
//!
//! 负责抓取单个章节页面的正文内容。
//! 每次调用都会启动并关闭自己的渲染会话，章节之间不共享任何浏览器状态，
//! 单个章节的失败不会影响其他章节。

use std::time::Duration;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tokio::time::sleep;
use tracing::error;

use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::PageRenderer;

/// 正文容器选择器
const CONTENT_SELECTOR: &str = "div.read-content";

/// 抓取章节页面正文内容
///
/// 启动独立的无头浏览器会话，导航后固定等待 `render_delay_secs`
/// 让动态内容渲染完成，再从渲染后的 HTML 中提取正文。
///
/// # 返回
/// - `Ok(Some(content))`: 成功提取正文
/// - `Ok(None)`: 页面已渲染但缺少正文容器（可恢复的单章失败）
/// - `Err(_)`: 浏览器会话层面的错误
///
/// 无论哪条路径返回，本次会话都会被释放。
pub async fn fetch_chapter_content(config: &Config, chapter_url: &str) -> Result<Option<String>> {
    let renderer = PageRenderer::launch(config, chapter_url).await?;
    let result = fetch_rendered_text(&renderer, config, chapter_url).await;
    // 成功与失败路径都释放本次会话
    renderer.close().await;
    result
}

async fn fetch_rendered_text(
    renderer: &PageRenderer,
    config: &Config,
    chapter_url: &str,
) -> Result<Option<String>> {
    // 固定等待动态内容渲染完成（不做 DOM 就绪轮询）
    sleep(Duration::from_secs(config.render_delay_secs)).await;

    let html = renderer.html().await?;

    match extract_chapter_text(&html) {
        Some(content) => Ok(Some(content)),
        None => {
            error!("未找到正文内容: {}", chapter_url);
            Ok(None)
        }
    }
}

/// 从渲染后的 HTML 中提取章节正文
///
/// 规则与站点页面结构对应：
/// - 正文位于 `div.read-content` 容器内，容器缺失返回 `None`
/// - 每个 `<p>` 先剔除内嵌的 `<span>` 注音标签再取文本
/// - 跳过空白段落，段落之间以单个换行连接
/// - 连续空行压缩为一个空行
pub fn extract_chapter_text(html: &str) -> Option<String> {
    let Ok(content_sel) = Selector::parse(CONTENT_SELECTOR) else {
        return None;
    };
    let Ok(p_sel) = Selector::parse("p") else {
        return None;
    };

    let document = Html::parse_document(html);
    let container = document.select(&content_sel).next()?;

    let mut lines = Vec::new();
    for p in container.select(&p_sel) {
        let text = paragraph_text(&p);
        let text = text.trim();
        if !text.is_empty() {
            lines.push(text.to_string());
        }
    }

    Some(collapse_blank_lines(&lines.join("\n")))
}

/// 取段落中非 span 后代的文本
fn paragraph_text(p: &ElementRef) -> String {
    let mut out = String::new();
    collect_text(*p, &mut out);
    out
}

fn collect_text(node: ElementRef, out: &mut String) {
    for child in node.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(element) = ElementRef::wrap(child) {
            if element.value().name() != "span" {
                collect_text(element, out);
            }
        }
    }
}

/// 将连续空行压缩为一个空行
fn collapse_blank_lines(content: &str) -> String {
    if let Ok(re) = Regex::new(r"\n\s*\n") {
        re.replace_all(content, "\n\n").into_owned()
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_joins_paragraphs_with_newlines() {
        let html = r#"
            <html><body>
            <div class="read-content">
                <p>第一段。</p>
                <p>第二段。</p>
                <p>第三段。</p>
            </div>
            </body></html>
        "#;
        let content = extract_chapter_text(html).unwrap();
        assert_eq!(content, "第一段。\n第二段。\n第三段。");
    }

    #[test]
    fn extract_strips_span_annotations() {
        let html = r#"
            <div class="read-content">
                <p>汉字<span>hàn zì</span>正文</p>
            </div>
        "#;
        let content = extract_chapter_text(html).unwrap();
        assert_eq!(content, "汉字正文");
    }

    #[test]
    fn extract_keeps_text_inside_non_span_elements() {
        let html = r#"
            <div class="read-content">
                <p>前<em>强调</em>后</p>
            </div>
        "#;
        let content = extract_chapter_text(html).unwrap();
        assert_eq!(content, "前强调后");
    }

    #[test]
    fn extract_skips_empty_paragraphs() {
        let html = r#"
            <div class="read-content">
                <p>有内容</p>
                <p>   </p>
                <p><span>只有注音</span></p>
                <p>还有内容</p>
            </div>
        "#;
        let content = extract_chapter_text(html).unwrap();
        assert_eq!(content, "有内容\n还有内容");
    }

    #[test]
    fn extract_returns_none_without_container() {
        let html = "<html><body><div class=\"other\"><p>不是正文</p></div></body></html>";
        assert!(extract_chapter_text(html).is_none());
    }

    #[test]
    fn collapse_blank_lines_squashes_runs() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n \t \nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }
}
