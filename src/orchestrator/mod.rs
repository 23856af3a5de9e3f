//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整体流程与并发调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `novel_downloader` - 小说下载器
//! - 管理一次下载的完整流程（元信息 → 目录 → 抓取 → 组装）
//! - 持有目录渲染会话并保证释放
//! - 输出全局统计信息
//!
//! ### `chapter_scheduler` - 章节抓取调度器
//! - 控制并发数量（Semaphore）
//! - 收集每个章节的抓取结果（ResultSet）
//! - 隔离单章失败，汇报进度
//!
//! ## 层次关系
//!
//! ```text
//! novel_downloader (一本小说)
//!     ↓
//! chapter_scheduler (并发处理 Vec<Chapter>)
//!     ↓
//! services (能力层：catalog / chapter_fetcher / novel_writer)
//!     ↓
//! infrastructure (基础设施：PageRenderer)
//! ```

pub mod chapter_scheduler;
pub mod novel_downloader;

pub use chapter_scheduler::{run_with, schedule_fetches};
pub use novel_downloader::NovelDownloader;
