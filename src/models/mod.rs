pub mod novel;

pub use novel::{Chapter, ChapterOutcome, DownloadStats, NovelInfo, ResultSet};
