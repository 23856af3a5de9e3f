use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 网络请求错误
    #[error("网络错误: {0}")]
    Fetch(#[from] FetchError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] std::io::Error),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 浏览器配置失败
    #[error("配置无头浏览器失败: {message}")]
    ConfigurationFailed { message: String },
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 获取渲染后页面内容失败
    #[error("获取页面内容失败: {source}")]
    ContentFailed {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}

/// 网络请求错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 单次请求失败
    #[error("获取页面失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 重试次数耗尽
    #[error("获取页面失败 ({url}): 已重试 {attempts} 次")]
    RetriesExhausted {
        url: String,
        attempts: usize,
        #[source]
        source: reqwest::Error,
    },
    /// HTTP 客户端构建失败
    #[error("构建 HTTP 客户端失败: {source}")]
    ClientBuildFailed {
        #[source]
        source: reqwest::Error,
    },
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;
