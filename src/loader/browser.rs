//! Headless Chrome loader.
//!
//! Launches Chrome with automation fingerprints masked, navigates to the
//! target, lets dynamic content settle, and snapshots the rendered HTML.
//! The session lives in a [`BrowserSession`] guard, so it is torn down on
//! every exit path.

use std::ffi::OsStr;
use std::sync::Arc;
use std::thread;

use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};

use crate::document::RenderedDocument;
use crate::error::LoadError;
use crate::loader::settle::settle;
use crate::loader::DocumentSource;
use crate::options::ScrapeOptions;

/// Chrome switches applied to every session.
pub const STEALTH_ARGS: &[&str] = &[
    "--disable-extensions",
    "--disable-blink-features=AutomationControlled",
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-default-apps",
    "--mute-audio",
];

/// Default Chrome switches removed from every session.
pub const IGNORED_DEFAULT_ARGS: &[&str] = &["--enable-automation"];

/// Runs before any page script; hides the `navigator.webdriver` flag.
const MASK_WEBDRIVER_JS: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined,
        configurable: true
    });
"#;

/// A live browser with one open tab.
///
/// Dropping the session closes the tab; dropping the inner `Browser` then
/// terminates the Chrome process.
pub struct BrowserSession {
    tab: Arc<Tab>,
    // Declared after `tab` so the tab is released first.
    _browser: Browser,
}

impl BrowserSession {
    /// Launch Chrome and open a tab configured from `options`.
    ///
    /// # Errors
    ///
    /// `LoadError::SessionStart` if Chrome cannot be launched or configured.
    pub fn start(options: &ScrapeOptions) -> Result<Self, LoadError> {
        let launch = launch_options(options)?;
        let browser = Browser::new(launch).map_err(|e| LoadError::SessionStart(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| LoadError::SessionStart(format!("failed to open tab: {e}")))?;

        tab.set_default_timeout(options.navigation_timeout);
        tab.set_user_agent(&options.user_agent, None, None)
            .map_err(|e| LoadError::SessionStart(format!("failed to set user agent: {e}")))?;
        tab.call_method(Page::AddScriptToEvaluateOnNewDocument {
            source: MASK_WEBDRIVER_JS.to_string(),
            world_name: None,
            include_command_line_api: None,
            run_immediately: None,
        })
        .map_err(|e| LoadError::SessionStart(format!("failed to install init script: {e}")))?;

        tracing::debug!(headless = options.headless, "browser session started");
        Ok(Self { tab, _browser: browser })
    }

    /// The session's tab.
    #[must_use]
    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    /// Navigate and wait for the page to finish loading.
    ///
    /// # Errors
    ///
    /// `LoadError::Navigation` on failure or when the navigation timeout
    /// elapses.
    pub fn navigate(&self, url: &str) -> Result<(), LoadError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| navigation_error(url, e))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| navigation_error(url, e))?;
        Ok(())
    }

    /// Current rendered HTML of the page.
    ///
    /// # Errors
    ///
    /// `LoadError::Snapshot` if the content cannot be read.
    pub fn snapshot(&self) -> Result<String, LoadError> {
        self.tab
            .get_content()
            .map_err(|e| LoadError::Snapshot(e.to_string()))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(err) = self.tab.close(false) {
            tracing::debug!("tab close during teardown failed: {err}");
        }
        tracing::debug!("browser session closed");
    }
}

fn navigation_error(url: &str, reason: impl std::fmt::Display) -> LoadError {
    LoadError::Navigation {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

fn launch_options(options: &ScrapeOptions) -> Result<LaunchOptions<'static>, LoadError> {
    LaunchOptions::default_builder()
        .headless(options.headless)
        .sandbox(options.sandbox)
        .window_size(Some(options.window_size))
        .idle_browser_timeout(options.navigation_timeout + options.settle_wait * 2)
        .args(STEALTH_ARGS.iter().map(OsStr::new).collect())
        .ignore_default_args(IGNORED_DEFAULT_ARGS.iter().map(OsStr::new).collect())
        .build()
        .map_err(|e| LoadError::SessionStart(e.to_string()))
}

/// Loads pages through a fresh headless Chrome session per call.
#[derive(Debug, Clone, Default)]
pub struct ChromeLoader {
    options: ScrapeOptions,
}

impl ChromeLoader {
    #[must_use]
    pub fn new(options: ScrapeOptions) -> Self {
        Self { options }
    }
}

impl DocumentSource for ChromeLoader {
    /// Open a session, load `url`, wait, settle, snapshot.
    ///
    /// The session is closed before this returns, whether it succeeded or
    /// not.
    fn load(&self, url: &str) -> Result<RenderedDocument, LoadError> {
        let session = BrowserSession::start(&self.options)?;

        tracing::info!("Navigating to: {url}");
        session.navigate(url)?;
        thread::sleep(self.options.settle_wait);

        let report = settle(session.tab(), &self.options.settle);
        if report.failed > 0 {
            tracing::debug!(failed = report.failed, "some dynamic content steps were skipped");
        }

        let html = session.snapshot()?;
        tracing::debug!(bytes = html.len(), "page snapshot taken");
        Ok(RenderedDocument::from_html(url, &html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn stealth_args_mask_automation() {
        assert!(STEALTH_ARGS.contains(&"--disable-extensions"));
        assert!(STEALTH_ARGS.contains(&"--disable-blink-features=AutomationControlled"));
    }

    #[test]
    fn launch_options_build_from_defaults() {
        let launch = launch_options(&ScrapeOptions::default()).expect("defaults are valid");
        assert!(launch.headless);
        assert!(launch
            .ignore_default_args
            .contains(&OsStr::new("--enable-automation")));
        assert!(launch
            .args
            .contains(&OsStr::new("--disable-blink-features=AutomationControlled")));
    }

    #[test]
    fn launch_options_accept_visible_browser() {
        let options = ScrapeOptions {
            headless: false,
            sandbox: false,
            navigation_timeout: Duration::from_secs(5),
            ..ScrapeOptions::default()
        };
        assert!(launch_options(&options).is_ok());
    }
}
