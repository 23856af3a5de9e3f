//! 小说下载器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整次下载的入口，负责整体流程与资源管理。
//!
//! ## 流程
//!
//! ```text
//! 启动目录渲染会话 → 解析元信息 → 解析章节目录
//!     → 目录为空：中止（仍释放会话）
//!     → 目录非空：并发抓取全部章节 → 按目录顺序组装写出
//! ```
//!
//! ## 设计特点
//!
//! - **资源所有者**：目录渲染会话只在本模块持有，成功、空目录中止、
//!   出错三条路径都会释放
//! - **向下委托**：目录解析、抓取调度、文件写出分别委托给对应服务
//! - **部分成功是常态**：个别章节失败只产生警告，不影响退出状态

use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::PageRenderer;
use crate::models::DownloadStats;
use crate::orchestrator::chapter_scheduler;
use crate::services::{catalog, NovelWriter};
use crate::utils::logging;

/// 小说下载器
pub struct NovelDownloader {
    config: Config,
}

impl NovelDownloader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 下载整本小说并保存到文件
    ///
    /// # 返回
    /// - `Ok(true)`: 下载完成（允许部分章节失败）
    /// - `Ok(false)`: 目录解析完全失败，没有找到任何章节
    ///
    /// 无论哪条路径返回，目录渲染会话都会被释放。
    pub async fn run(&self, novel_url: &str) -> Result<bool> {
        // 元信息与章节目录共用一个长生命周期渲染会话
        let renderer = PageRenderer::launch(&self.config, "about:blank").await?;
        let result = self.run_inner(&renderer, novel_url).await;
        renderer.close().await;
        result
    }

    async fn run_inner(&self, renderer: &PageRenderer, novel_url: &str) -> Result<bool> {
        let info = catalog::resolve_novel_info(renderer, &self.config, novel_url).await;
        info!("📖 书名: 《{}》，作者: {}", info.title, info.author);

        let chapters = catalog::resolve_chapter_list(renderer, &self.config, novel_url).await?;
        if chapters.is_empty() {
            error!("未找到章节!");
            return Ok(false);
        }

        logging::log_chapters_found(chapters.len(), self.config.max_concurrent_chapters);

        let results = chapter_scheduler::schedule_fetches(&chapters, &self.config).await?;

        let writer = NovelWriter::new(self.config.output_dir.as_str());
        let path = writer.write(&info, &chapters, &results)?;

        let stats = DownloadStats::from_results(chapters.len(), &results);
        logging::print_final_stats(&stats, &path);
        info!("小说下载完成,保存至: {}", path.display());

        Ok(true)
    }
}
