/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 小说站点根地址
    pub base_url: String,
    /// 同时抓取的章节数量
    pub max_concurrent_chapters: usize,
    /// 页面导航后等待动态内容渲染的秒数
    pub render_delay_secs: u64,
    /// 等待小说标题元素出现的秒数
    pub info_wait_secs: u64,
    /// 等待章节列表元素出现的秒数
    pub catalog_wait_secs: u64,
    /// 普通 HTTP 请求超时秒数
    pub request_timeout_secs: u64,
    /// 普通 HTTP 请求最大重试次数
    pub max_retries: usize,
    /// 小说输出目录
    pub output_dir: String,
    /// 浏览器可执行文件路径（为空时自动探测）
    pub chrome_executable: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://www.hongxiu.com".to_string(),
            max_concurrent_chapters: 10,
            render_delay_secs: 2,
            info_wait_secs: 10,
            catalog_wait_secs: 15,
            request_timeout_secs: 10,
            max_retries: 3,
            output_dir: "novels".to_string(),
            chrome_executable: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("BASE_URL").unwrap_or(default.base_url),
            max_concurrent_chapters: std::env::var("MAX_CONCURRENT_CHAPTERS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_chapters),
            render_delay_secs: std::env::var("RENDER_DELAY_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.render_delay_secs),
            info_wait_secs: std::env::var("INFO_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.info_wait_secs),
            catalog_wait_secs: std::env::var("CATALOG_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.catalog_wait_secs),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok(),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
