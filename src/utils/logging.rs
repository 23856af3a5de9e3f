/// 日志工具模块
///
/// 提供日志初始化和输出格式化的辅助函数
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::DownloadStats;

/// 初始化日志
///
/// 默认 info 级别，可用 RUST_LOG 覆盖；重复初始化会被忽略，
/// 方便在测试里多次调用。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 并发章节下载模式");
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录章节目录解析结果
pub fn log_chapters_found(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个章节，开始并发下载...", total);
    info!("📋 最多同时抓取 {} 个章节\n", max_concurrent);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &DownloadStats, output_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部章节处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n小说已保存至: {}", output_path.display());
}
