//! 小说领域模型
//!
//! 目录解析产出 `NovelInfo` 和有序的 `Vec<Chapter>`；
//! 抓取调度为每个章节产出一个 `ChapterOutcome`。

/// 小说元信息
///
/// 每次运行只解析一次；解析失败时使用占位值，不会导致整次运行失败。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovelInfo {
    pub title: String,
    pub author: String,
}

impl NovelInfo {
    /// 元信息提取失败时的占位值
    pub fn unknown() -> Self {
        Self {
            title: "未知小说标题".to_string(),
            author: "未知作者".to_string(),
        }
    }
}

impl Default for NovelInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// 单个章节
///
/// 以 URL 作为章节标识；目录页中的出现顺序是唯一权威的输出顺序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub url: String,
    pub title: String,
}

impl Chapter {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// 单章抓取结果
///
/// 每个提交到调度器的章节恰好产出一个结果，失败不会丢条目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterOutcome {
    /// 成功抓到正文
    Fetched(String),
    /// 页面已渲染但缺少正文容器
    Missing,
    /// 抓取过程出错（保留错误描述）
    Failed(String),
}

impl ChapterOutcome {
    /// 成功时返回正文内容
    pub fn content(&self) -> Option<&str> {
        match self {
            ChapterOutcome::Fetched(text) => Some(text),
            ChapterOutcome::Missing | ChapterOutcome::Failed(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ChapterOutcome::Fetched(_))
    }
}

/// 抓取结果集：章节 URL → 抓取结果
///
/// 由多个并发完成的抓取任务写入。URL 在目录内应当唯一；
/// 若目录中出现重复 URL，后写入者覆盖先写入者（last-writer-wins），
/// 结果集对该 URL 只保留一个条目。
pub type ResultSet = dashmap::DashMap<String, ChapterOutcome>;

/// 下载统计
#[derive(Debug, Default)]
pub struct DownloadStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}

impl DownloadStats {
    /// 从结果集汇总统计
    pub fn from_results(total: usize, results: &ResultSet) -> Self {
        let success = results.iter().filter(|e| e.value().is_success()).count();
        Self {
            success,
            failed: total.saturating_sub(success),
            total,
        }
    }
}
