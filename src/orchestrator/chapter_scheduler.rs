//! 章节抓取调度器 - 编排层
//!
//! ## 职责
//!
//! 1. **并发控制**：使用 Semaphore 把同时运行的抓取任务数压在上限内，
//!    这是唯一的并发控制手段（没有额外限速或背压）
//! 2. **结果收集**：每个提交的章节恰好产出一个 `ChapterOutcome`，
//!    以章节 URL 为键写入共享结果集
//! 3. **失败隔离**：单个章节的失败（包括任务 panic）只记录为失败条目，
//!    绝不中止其余章节的抓取
//! 4. **进度汇报**：每个任务完成时输出 完成数/总数
//!
//! 调度完成的条件是所有任务都有了记录在案的结果。任务一旦派发就会
//! 运行到底，没有取消和全局超时（已知的取舍，不在此处弥补）。

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Chapter, ChapterOutcome, ResultSet};
use crate::services::chapter_fetcher;

/// 并发抓取所有章节的正文
///
/// 每个章节独立调用章节抓取服务（独立的渲染会话），
/// 并发数由 `max_concurrent_chapters` 限制。
pub async fn schedule_fetches(chapters: &[Chapter], config: &Config) -> Result<ResultSet> {
    let limit = config.max_concurrent_chapters.max(1);
    let config = config.clone();

    run_with(chapters, limit, move |chapter| {
        let config = config.clone();
        async move {
            match chapter_fetcher::fetch_chapter_content(&config, &chapter.url).await {
                Ok(Some(content)) => ChapterOutcome::Fetched(content),
                Ok(None) => ChapterOutcome::Missing,
                Err(e) => {
                    error!("获取章节内容出错 {}: {}", chapter.url, e);
                    ChapterOutcome::Failed(e.to_string())
                }
            }
        }
    })
    .await
}

/// 用给定的抓取函数并发处理章节列表
///
/// 调度核心与真实抓取解耦，`fetch` 决定单个章节如何产出结果，
/// 本函数只负责并发上限、结果收集与失败隔离。
pub async fn run_with<F, Fut>(chapters: &[Chapter], limit: usize, fetch: F) -> Result<ResultSet>
where
    F: Fn(Chapter) -> Fut,
    Fut: Future<Output = ChapterOutcome> + Send + 'static,
{
    let total = chapters.len();
    let results = Arc::new(ResultSet::new());
    let completed = Arc::new(AtomicUsize::new(0));
    let semaphore = Arc::new(Semaphore::new(limit));

    let mut handles = Vec::with_capacity(total);

    // 为每个章节创建并发任务，许可在派发时获取，保证同时运行的任务数不超上限
    for chapter in chapters {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| AppError::Other(format!("获取并发许可失败: {}", e)))?;

        let results = Arc::clone(&results);
        let completed = Arc::clone(&completed);
        let url = chapter.url.clone();
        let future = fetch(chapter.clone());

        let handle = tokio::spawn(async move {
            let _permit = permit;
            let outcome = future.await;
            results.insert(url, outcome);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            info!("📖 章节下载进度: {}/{}", done, total);
        });
        handles.push((chapter.clone(), handle));
    }

    // 等待所有任务都产出记录在案的结果；panic 的任务转成失败条目而不是丢失
    for (chapter, handle) in handles {
        if let Err(e) = handle.await {
            error!("章节 {} 下载任务执行失败: {}", chapter.url, e);
            results.insert(
                chapter.url.clone(),
                ChapterOutcome::Failed(format!("任务执行失败: {}", e)),
            );
        }
    }

    match Arc::try_unwrap(results) {
        Ok(set) => Ok(set),
        // 正常情况下所有任务都已结束、引用都已释放；兜底复制一份
        Err(shared) => Ok(shared
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn chapters(n: usize) -> Vec<Chapter> {
        (1..=n)
            .map(|i| Chapter::new(format!("https://x/c/{}", i), format!("第{}章", i)))
            .collect()
    }

    #[tokio::test]
    async fn n_chapters_produce_n_entries() {
        let chapters = chapters(5);
        // 反向的完成顺序：靠前的章节睡得更久
        let results = run_with(&chapters, 5, |chapter| async move {
            let idx: u64 = chapter.url.rsplit('/').next().unwrap().parse().unwrap();
            sleep(Duration::from_millis((6 - idx) * 20)).await;
            ChapterOutcome::Fetched(format!("{}的内容", chapter.title))
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 5);
        for chapter in &chapters {
            assert!(results.get(&chapter.url).unwrap().is_success());
        }
    }

    #[tokio::test]
    async fn empty_catalog_produces_empty_result_set() {
        let results = run_with(&[], 10, |_chapter| async move {
            ChapterOutcome::Fetched(String::new())
        })
        .await
        .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn one_failure_does_not_affect_siblings() {
        let chapters = chapters(3);
        let results = run_with(&chapters, 3, |chapter| async move {
            if chapter.url.ends_with("/2") {
                ChapterOutcome::Failed("模拟网络错误".to_string())
            } else {
                ChapterOutcome::Fetched(format!("{}的内容", chapter.title))
            }
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.get("https://x/c/1").unwrap().is_success());
        assert!(!results.get("https://x/c/2").unwrap().is_success());
        assert!(results.get("https://x/c/3").unwrap().is_success());
    }

    #[tokio::test]
    async fn panicked_task_becomes_failed_entry() {
        let chapters = chapters(3);
        let results = run_with(&chapters, 3, |chapter| async move {
            if chapter.url.ends_with("/2") {
                panic!("模拟任务崩溃");
            }
            ChapterOutcome::Fetched(format!("{}的内容", chapter.title))
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 3);
        assert!(matches!(
            results.get("https://x/c/2").unwrap().value(),
            ChapterOutcome::Failed(_)
        ));
        assert!(results.get("https://x/c/1").unwrap().is_success());
        assert!(results.get("https://x/c/3").unwrap().is_success());
    }

    #[tokio::test]
    async fn duplicate_urls_keep_single_entry() {
        let chapters = vec![
            Chapter::new("https://x/c/1", "第一章"),
            Chapter::new("https://x/c/1", "重复的第一章"),
            Chapter::new("https://x/c/2", "第二章"),
        ];
        let results = run_with(&chapters, 2, |chapter| async move {
            ChapterOutcome::Fetched(format!("{}的内容", chapter.title))
        })
        .await
        .unwrap();

        // 重复 URL 只保留一个条目（后写入者覆盖）
        assert_eq!(results.len(), 2);
        assert!(results.contains_key("https://x/c/1"));
        assert!(results.contains_key("https://x/c/2"));
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_limit() {
        let chapters = chapters(8);
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = {
            let current = Arc::clone(&current);
            let peak = Arc::clone(&peak);
            run_with(&chapters, 2, move |chapter| {
                let current = Arc::clone(&current);
                let peak = Arc::clone(&peak);
                async move {
                    let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    sleep(Duration::from_millis(30)).await;
                    current.fetch_sub(1, Ordering::SeqCst);
                    ChapterOutcome::Fetched(chapter.title)
                }
            })
            .await
            .unwrap()
        };

        assert_eq!(results.len(), 8);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
