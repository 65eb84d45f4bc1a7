//! Anti-detection capability sets and scripts

/// Chromium arguments shared by both back-ends
pub const BASE_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-notifications",
    "--disable-infobars",
    "--window-size=1280,900",
    "--lang=en-US",
];

/// Extra arguments for the undetected remote back-end
pub const UNDETECTED_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-features=IsolateOrigins,site-per-process,TranslateUI",
    "--disable-site-isolation-trials",
    "--disable-background-networking",
    "--disable-default-apps",
    "--disable-sync",
    "--no-first-run",
    "--no-default-browser-check",
];

/// Desktop user agent used when no override is configured
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Mobile user agent; the upload dialog differs on mobile layouts
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";

/// Script run after navigation to mask automation fingerprints
pub const STEALTH_SCRIPT: &str = r"
    Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
    Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });
    Object.defineProperty(navigator, 'plugins', { get: () => [1, 2, 3] });
    window.chrome = window.chrome || { runtime: {} };
";

/// Headless flag understood by modern Chromium
pub const HEADLESS_ARG: &str = "--headless=new";

/// Build the argument list for one back-end
#[must_use]
pub fn build_args(headless: bool, undetected: bool, user_agent: Option<&str>) -> Vec<String> {
    let mut args: Vec<String> = BASE_ARGS.iter().map(ToString::to_string).collect();
    if headless {
        args.push(HEADLESS_ARG.to_string());
    }
    if undetected {
        args.extend(UNDETECTED_ARGS.iter().map(ToString::to_string));
    }
    let agent = user_agent.unwrap_or(DESKTOP_USER_AGENT);
    args.push(format!("--user-agent={agent}"));
    args
}
