use crate::error::{AppResult, BrowserError};
use chromiumoxide::Browser;
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 连接到已开启调试端口的浏览器，在新标签页中打开链接
///
/// 只断开调试连接，不关闭浏览器，标签页留给用户操作
pub async fn open_url_in_browser(port: u16, url: &str) -> AppResult<()> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        BrowserError::ConnectionFailed { port, source: e }
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    let events = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let result = browser.new_page(url).await.map_err(|e| {
        error!("打开 {} 失败: {}", url, e);
        BrowserError::NavigationFailed {
            url: url.to_string(),
            source: e,
        }
    });

    drop(browser);
    events.abort();

    result?;
    info!("✓ 已在浏览器中打开: {}", url);
    Ok(())
}
