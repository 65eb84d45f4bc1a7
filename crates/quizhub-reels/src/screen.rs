//! Publish dialog screen disambiguation
//!
//! The dialog reuses the same chrome across its upload, crop, edit and
//! final screens, so before pressing anything the pipeline classifies
//! where it actually stands. "Next" is never pressed on the final
//! screen; "Share" is never pressed earlier.

use tracing::debug;

use quizhub_browser::Browser;

use crate::error::PipelineResult;
use crate::selectors;

/// Which screen of the publish dialog is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// File selection, before any media is attached
    Upload,
    /// Crop or edit, media attached, "Next" advances
    CropOrEdit,
    /// Caption and share controls
    Final,
    /// Nothing recognizable matched
    Unknown,
}

impl Screen {
    /// Whether pressing "Next" is allowed here
    #[must_use]
    pub fn allows_next(self) -> bool {
        matches!(self, Self::CropOrEdit)
    }
}

/// Classify the current dialog screen.
///
/// The final screen is checked first and only counts when the caption
/// editor and a share control show together; a caption-like widget
/// without its share button is not the final screen. A file input alone
/// means upload; a preview means crop/edit.
pub async fn classify(browser: &dyn Browser) -> PipelineResult<Screen> {
    let has_caption = selectors::find_control(browser, selectors::CAPTION_FIELD)
        .await?
        .is_some();
    if has_caption
        && selectors::find_control(browser, selectors::SHARE_BUTTON)
            .await?
            .is_some()
    {
        debug!("screen classified as final");
        return Ok(Screen::Final);
    }

    let preview = selectors::find_preview(browser).await?;
    if preview.is_some() {
        debug!("screen classified as crop/edit");
        return Ok(Screen::CropOrEdit);
    }

    let mut has_input = false;
    for &selector in selectors::FILE_INPUT {
        if browser.element_exists(selector).await? {
            has_input = true;
            break;
        }
    }
    let has_button = selectors::find_control(browser, selectors::SELECT_FROM_COMPUTER)
        .await?
        .is_some();
    if has_input || has_button {
        debug!("screen classified as upload");
        return Ok(Screen::Upload);
    }

    debug!("screen not recognized");
    Ok(Screen::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quizhub_browser::browser::ElementBox;
    use quizhub_browser::BrowserResult;
    use quizhub_core::entities::SessionCookie;
    use std::collections::HashSet;
    use std::time::Duration;

    /// A page that simply contains the given selectors, all visible
    struct StaticDom(HashSet<&'static str>);

    impl StaticDom {
        fn new(selectors: &[&'static str]) -> Self {
            Self(selectors.iter().copied().collect())
        }
    }

    #[async_trait]
    impl Browser for StaticDom {
        async fn start(&mut self) -> BrowserResult<()> {
            Ok(())
        }
        async fn stop(&mut self) -> BrowserResult<()> {
            Ok(())
        }
        async fn navigate(&self, _url: &str) -> BrowserResult<()> {
            Ok(())
        }
        async fn wait_for_element(
            &self,
            _selector: &str,
            _timeout: Duration,
            _visible: bool,
        ) -> BrowserResult<()> {
            Ok(())
        }
        async fn element_exists(&self, selector: &str) -> BrowserResult<bool> {
            Ok(self.0.contains(selector))
        }
        async fn element_visible(&self, selector: &str) -> BrowserResult<bool> {
            Ok(self.0.contains(selector))
        }
        async fn element_box(&self, _selector: &str) -> BrowserResult<ElementBox> {
            Ok(ElementBox {
                x: 0.0,
                y: 0.0,
                width: 320.0,
                height: 32.0,
            })
        }
        async fn click(&self, _selector: &str) -> BrowserResult<()> {
            Ok(())
        }
        async fn fill(&self, _selector: &str, _text: &str) -> BrowserResult<()> {
            Ok(())
        }
        async fn upload_file(&self, _selector: &str, _path: &str) -> BrowserResult<()> {
            Ok(())
        }
        async fn get_cookies(&self) -> BrowserResult<Vec<SessionCookie>> {
            Ok(Vec::new())
        }
        async fn set_cookies(&self, _cookies: &[SessionCookie]) -> BrowserResult<()> {
            Ok(())
        }
        async fn clear_cookies(&self) -> BrowserResult<()> {
            Ok(())
        }
        async fn page_source(&self) -> BrowserResult<String> {
            Ok(String::new())
        }
        async fn current_url(&self) -> BrowserResult<String> {
            Ok(String::new())
        }
        async fn execute_script(&self, _script: &str) -> BrowserResult<()> {
            Ok(())
        }
        async fn random_delay(&self, _min: Duration, _max: Duration) {}
    }

    const CAPTION: &str = r#"div[role="dialog"] div[contenteditable="true"][role="textbox"]"#;
    const DIALOG_BUTTON: &str = r#"div[role="dialog"] div[role="button"][tabindex="0"]"#;
    const PREVIEW: &str = r#"div[role="dialog"] video"#;

    #[tokio::test]
    async fn test_caption_with_share_is_final() {
        let page = StaticDom::new(&[CAPTION, DIALOG_BUTTON, PREVIEW]);
        assert_eq!(classify(&page).await.unwrap(), Screen::Final);
    }

    #[tokio::test]
    async fn test_caption_without_share_is_not_final() {
        // A caption-like widget alone must not unlock the share step.
        let page = StaticDom::new(&[CAPTION, PREVIEW]);
        assert_eq!(classify(&page).await.unwrap(), Screen::CropOrEdit);
    }

    #[tokio::test]
    async fn test_file_input_alone_is_upload() {
        let page = StaticDom::new(&[r#"input[type="file"]"#]);
        assert_eq!(classify(&page).await.unwrap(), Screen::Upload);
    }

    #[tokio::test]
    async fn test_empty_page_is_unknown() {
        let page = StaticDom::new(&[]);
        assert_eq!(classify(&page).await.unwrap(), Screen::Unknown);
    }
}
