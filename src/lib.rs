//! # Hongxiu Novel Downloader
//!
//! 一个用于抓取红袖添香小说并保存为文本文件的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Browser / Page），只暴露能力
//! - `PageRenderer` - 渲染会话的唯一 owner，提供 navigate / wait / html 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个关注点
//! - `catalog` - 元信息与章节目录解析能力
//! - `chapter_fetcher` - 单章正文抓取能力（独立渲染会话）
//! - `NovelWriter` - 按目录顺序写出文本文件的能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/chapter_scheduler` - 并发抓取调度器，控制并发与失败隔离
//! - `orchestrator/novel_downloader` - 一次下载的完整流程与资源管理
//!
//! ## 模块结构

pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::PageClient;
pub use config::Config;
pub use error::{AppError, Result};
pub use infrastructure::PageRenderer;
pub use models::{Chapter, ChapterOutcome, DownloadStats, NovelInfo, ResultSet};
pub use orchestrator::NovelDownloader;
pub use services::NovelWriter;
