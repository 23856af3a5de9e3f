//! 页面渲染器 - 基础设施层
//!
//! 持有唯一的 Browser / Page 资源，只暴露"渲染页面"的能力

use std::time::Duration;

use chromiumoxide::{Browser, Page};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::browser::launch_headless_browser;
use crate::config::Config;
use crate::error::{BrowserError, Result};

/// 轮询元素是否出现的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 页面渲染器
///
/// 职责：
/// - 持有一个无头浏览器会话（Browser + Page）
/// - 暴露 navigate / wait_for_element / html 能力
/// - 不认识 Novel / Chapter，不处理业务流程
/// - `close` 按值消耗自身，释放后的会话无法再被使用
pub struct PageRenderer {
    browser: Browser,
    page: Page,
}

impl PageRenderer {
    /// 启动一个新的渲染会话并导航到初始 URL
    pub async fn launch(config: &Config, url: &str) -> Result<Self> {
        let (browser, page) = launch_headless_browser(config, url).await?;
        Ok(Self { browser, page })
    }

    /// 导航到指定 URL
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(|e| BrowserError::NavigationFailed {
            url: url.to_string(),
            source: e,
        })?;
        debug!("页面导航成功: {}", url);
        Ok(())
    }

    /// 等待指定选择器的元素出现
    ///
    /// 在超时之前轮询元素是否存在；超时返回 `false` 而不是错误，
    /// 调用方可以在元素缺失时继续尽力解析。
    pub async fn wait_for_element(&self, selector: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// 获取渲染后的完整 HTML
    pub async fn html(&self) -> Result<String> {
        let html = self
            .page
            .content()
            .await
            .map_err(|e| BrowserError::ContentFailed { source: e })?;
        Ok(html)
    }

    /// 关闭会话并释放浏览器进程
    ///
    /// 无论成功与否都只记录日志，关闭失败不影响调用方的返回值。
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("等待浏览器进程退出失败: {}", e);
        }
        debug!("渲染会话已释放");
    }
}
