//! 小说写出服务 - 业务能力层
//!
//! 按目录顺序把抓取结果组装成单个文本文件。
//! 输出顺序只由目录顺序决定，与抓取完成顺序无关，
//! 同一组输入重复写出得到逐字节相同的结果。

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use regex::Regex;
use tracing::warn;

use crate::error::Result;
use crate::models::{Chapter, ChapterOutcome, NovelInfo, ResultSet};

/// 分隔线宽度
const SEPARATOR_WIDTH: usize = 50;

/// 小说写出服务
///
/// 职责：
/// - 由小说标题推导输出文件路径（非法字符替换为下划线）
/// - 创建输出目录并流式写出，不在内存中拼接整本小说
pub struct NovelWriter {
    output_dir: PathBuf,
}

impl NovelWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 由小说标题推导输出文件路径
    pub fn output_path(&self, title: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.txt", sanitize_filename(title)))
    }

    /// 写出整本小说，返回输出文件路径
    pub fn write(
        &self,
        info: &NovelInfo,
        chapters: &[Chapter],
        results: &ResultSet,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(&info.title);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        write_novel(&mut writer, info, chapters, results)?;
        writer.flush()?;
        Ok(path)
    }
}

/// 按目录顺序把抓取结果写入输出流
///
/// 先写文件头（书名、作者、分隔线），再按 `chapters` 的目录顺序逐章写出；
/// 没有正文的章节整章跳过，只记录一条警告。
pub fn write_novel<W: Write>(
    sink: &mut W,
    info: &NovelInfo,
    chapters: &[Chapter],
    results: &ResultSet,
) -> Result<()> {
    // UTF-8 BOM，保持与原站下载文件一致的编码标记
    sink.write_all("\u{FEFF}".as_bytes())?;
    writeln!(sink, "《{}》", info.title)?;
    writeln!(sink, "作者: {}", info.author)?;
    writeln!(sink)?;
    writeln!(sink, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    writeln!(sink)?;

    // 遍历目录顺序，而不是结果集的迭代顺序
    for chapter in chapters {
        match results.get(&chapter.url).map(|entry| entry.value().clone()) {
            Some(ChapterOutcome::Fetched(content)) => {
                write!(sink, "\n\n{}\n\n", chapter.title)?;
                sink.write_all(content.as_bytes())?;
                write!(sink, "\n{}\n", "=".repeat(SEPARATOR_WIDTH))?;
            }
            _ => {
                warn!(
                    "跳过章节 {} ({})，因为它没有内容或下载失败",
                    chapter.title, chapter.url
                );
            }
        }
    }

    Ok(())
}

/// 清理标题中不能用于文件名的字符
pub fn sanitize_filename(title: &str) -> String {
    if let Ok(re) = Regex::new(r#"[<>:"/\\|?*]"#) {
        re.replace_all(title, "_").into_owned()
    } else {
        title.to_string()
    }
}
