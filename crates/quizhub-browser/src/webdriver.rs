//! Shared WebDriver plumbing for both back-ends

use std::time::Duration;

use rand::Rng;
use thirtyfour::{By, Cookie, WebDriver, WebElement};
use tracing::debug;

use quizhub_core::entities::SessionCookie;

use crate::browser::ElementBox;
use crate::error::{BrowserError, BrowserResult};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

pub(crate) async fn find(driver: &WebDriver, selector: &str) -> BrowserResult<WebElement> {
    driver.find(By::Css(selector)).await.map_err(|_| {
        BrowserError::ElementNotFound {
            selector: selector.to_string(),
        }
    })
}

pub(crate) async fn wait_for_element(
    driver: &WebDriver,
    selector: &str,
    timeout: Duration,
    visible: bool,
) -> BrowserResult<()> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Ok(elem) = driver.find(By::Css(selector)).await {
            if !visible {
                return Ok(());
            }
            let displayed = elem.is_displayed().await.unwrap_or(false);
            if displayed {
                let rect = elem.rect().await;
                if let Ok(r) = rect {
                    if r.width > 0.0 && r.height > 0.0 {
                        return Ok(());
                    }
                }
            }
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(BrowserError::Timeout {
                what: selector.to_string(),
                seconds: timeout.as_secs(),
            });
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

pub(crate) async fn element_exists(driver: &WebDriver, selector: &str) -> BrowserResult<bool> {
    Ok(driver.find(By::Css(selector)).await.is_ok())
}

pub(crate) async fn element_visible(driver: &WebDriver, selector: &str) -> BrowserResult<bool> {
    match driver.find(By::Css(selector)).await {
        Ok(elem) => Ok(elem.is_displayed().await.unwrap_or(false)),
        Err(_) => Ok(false),
    }
}

pub(crate) async fn element_box(driver: &WebDriver, selector: &str) -> BrowserResult<ElementBox> {
    let elem = find(driver, selector).await?;
    let rect = elem.rect().await?;
    Ok(ElementBox {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
    })
}

pub(crate) async fn click(driver: &WebDriver, selector: &str) -> BrowserResult<()> {
    let elem = find(driver, selector).await?;
    elem.click().await?;
    Ok(())
}

pub(crate) async fn fill(driver: &WebDriver, selector: &str, text: &str) -> BrowserResult<()> {
    let elem = find(driver, selector).await?;
    elem.clear().await?;
    elem.send_keys(text).await?;
    Ok(())
}

/// Send a path to a file input; if the input is hidden, unhide every file
/// input on the page via script and retry once.
pub(crate) async fn upload_file(
    driver: &WebDriver,
    selector: &str,
    path: &str,
) -> BrowserResult<()> {
    if let Ok(elem) = driver.find(By::Css(selector)).await {
        if elem.send_keys(path).await.is_ok() {
            return Ok(());
        }
    }

    debug!(selector, "direct upload failed, unhiding file inputs");
    driver
        .execute(
            r"
            document.querySelectorAll('input[type=file]').forEach(function (el) {
                el.style.display = 'block';
                el.style.visibility = 'visible';
                el.style.opacity = '1';
                el.style.width = '1px';
                el.style.height = '1px';
                el.removeAttribute('hidden');
            });
            ",
            Vec::new(),
        )
        .await
        .map_err(|e| BrowserError::Script(e.to_string()))?;

    let elem = find(driver, selector).await?;
    elem.send_keys(path)
        .await
        .map_err(|e| BrowserError::Upload(e.to_string()))?;
    Ok(())
}

pub(crate) async fn get_cookies(driver: &WebDriver) -> BrowserResult<Vec<SessionCookie>> {
    let raw = driver.get_all_cookies().await?;
    Ok(raw.iter().map(from_driver_cookie).collect())
}

pub(crate) async fn set_cookies(
    driver: &WebDriver,
    cookies: &[SessionCookie],
) -> BrowserResult<()> {
    for cookie in cookies {
        driver.add_cookie(to_driver_cookie(cookie)).await?;
    }
    Ok(())
}

pub(crate) async fn clear_cookies(driver: &WebDriver) -> BrowserResult<()> {
    driver.delete_all_cookies().await?;
    Ok(())
}

pub(crate) async fn page_source(driver: &WebDriver) -> BrowserResult<String> {
    Ok(driver.source().await?)
}

pub(crate) async fn current_url(driver: &WebDriver) -> BrowserResult<String> {
    Ok(driver.current_url().await?.to_string())
}

pub(crate) async fn execute_script(driver: &WebDriver, script: &str) -> BrowserResult<()> {
    driver
        .execute(script, Vec::new())
        .await
        .map_err(|e| BrowserError::Script(e.to_string()))?;
    Ok(())
}

pub(crate) async fn random_delay(min: Duration, max: Duration) {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let spread = high.as_millis().saturating_sub(low.as_millis());
    let jitter = if spread == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..=spread)
    };
    let total = low + Duration::from_millis(u64::try_from(jitter).unwrap_or(u64::MAX));
    tokio::time::sleep(total).await;
}

fn from_driver_cookie(cookie: &Cookie) -> SessionCookie {
    SessionCookie {
        name: cookie.name().to_string(),
        value: cookie.value().to_string(),
        domain: cookie.domain().map(str::to_string),
        path: cookie.path().map(str::to_string),
        secure: cookie.secure(),
        http_only: cookie.http_only(),
        expiry: None,
    }
}

fn to_driver_cookie(cookie: &SessionCookie) -> Cookie<'static> {
    let mut out = Cookie::new(cookie.name.clone(), cookie.value.clone());
    if let Some(domain) = &cookie.domain {
        out.set_domain(domain.clone());
    }
    if let Some(path) = &cookie.path {
        out.set_path(path.clone());
    }
    if let Some(secure) = cookie.secure {
        out.set_secure(secure);
    }
    if let Some(http_only) = cookie.http_only {
        out.set_http_only(http_only);
    }
    out
}
