//! 通用页面客户端
//!
//! 不经过浏览器渲染的普通 HTTP 抓取能力：带浏览器请求头、
//! 超时与线性退避重试。核心下载流程走渲染会话，不依赖本客户端。

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, REFERER, USER_AGENT,
};
use tokio::time::sleep;
use tracing::error;

use crate::config::Config;
use crate::error::{FetchError, Result};

/// 模拟桌面浏览器的 User-Agent
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 通用页面客户端
pub struct PageClient {
    client: reqwest::Client,
    max_retries: usize,
    retry_delay: Duration,
}

impl PageClient {
    /// 创建新的页面客户端
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.8,en;q=0.6"),
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        if let Ok(referer) = HeaderValue::from_str(&format!("{}/", config.base_url)) {
            headers.insert(REFERER, referer);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::ClientBuildFailed { source: e })?;

        Ok(Self {
            client,
            max_retries: config.max_retries.max(1),
            retry_delay: Duration::from_secs(config.render_delay_secs),
        })
    }

    /// 获取页面内容，包含错误处理和重试逻辑
    ///
    /// 失败后线性退避（第 n 次失败等待 `delay × n`），
    /// 重试次数耗尽返回 `FetchError::RetriesExhausted`。
    pub async fn get_page(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = self
                .client
                .get(url)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            match outcome {
                Ok(response) => {
                    return response.text().await.map_err(|e| {
                        FetchError::RequestFailed {
                            url: url.to_string(),
                            source: e,
                        }
                        .into()
                    });
                }
                Err(e) => {
                    error!("获取页面失败 {}: {}", url, e);
                    if attempt >= self.max_retries {
                        return Err(FetchError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: self.max_retries,
                            source: e,
                        }
                        .into());
                    }
                    sleep(backoff_delay(self.retry_delay, attempt)).await;
                }
            }
        }
    }
}

/// 线性退避的等待时长
fn backoff_delay(base: Duration, attempt: usize) -> Duration {
    base * attempt as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_default_config() {
        assert!(PageClient::new(&Config::default()).is_ok());
    }

    #[test]
    fn backoff_grows_linearly() {
        let base = Duration::from_secs(2);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(6));
    }
}
