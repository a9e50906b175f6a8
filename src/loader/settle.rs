//! Dynamic Content Settling
//!
//! Review pages hide content behind spoiler toggles and "show more"
//! expanders and load more on scroll. Before the page is snapshotted, the
//! settler presses those buttons and scrolls to the bottom.
//!
//! Every step is best effort. A failed click is logged and counted, then the
//! next element is tried; a failed element lookup skips only its own phase.

use std::thread;
use std::time::Duration;

use headless_chrome::Tab;

use crate::error::StepError;
use crate::options::{ButtonMarkers, SettleOptions};

/// The browser operations the settler needs.
///
/// Implemented for `headless_chrome::Tab`; tests use a scripted fake.
pub trait PageSession {
    /// Handle to one element on the page.
    type Element<'a>
    where
        Self: 'a;

    /// Every element matching an XPath expression, in document order.
    ///
    /// # Errors
    ///
    /// Fails when the lookup itself cannot run.
    fn find_by_xpath(&self, xpath: &str) -> Result<Vec<Self::Element<'_>>, StepError>;

    /// Whether the element is rendered and visible.
    ///
    /// # Errors
    ///
    /// Fails when the element can no longer be inspected.
    fn is_displayed(&self, element: &Self::Element<'_>) -> Result<bool, StepError>;

    /// Dispatch a click on the element from script.
    ///
    /// # Errors
    ///
    /// Fails when the click cannot be delivered.
    fn click(&self, element: &Self::Element<'_>) -> Result<(), StepError>;

    /// Scroll the viewport to the bottom of the document.
    ///
    /// # Errors
    ///
    /// Fails when the scroll script cannot run.
    fn scroll_to_bottom(&self) -> Result<(), StepError>;

    /// Block for `duration` to let the page react.
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// What the settler managed to do. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleReport {
    /// Buttons successfully clicked.
    pub clicked: usize,
    /// Lookups, visibility checks or clicks that failed.
    pub failed: usize,
    /// Whether the final scroll went through.
    pub scrolled: bool,
}

/// Reveal spoilers, expand truncated reviews, scroll to the bottom.
///
/// Never fails; see [`SettleReport`] for what happened.
pub fn settle<P: PageSession>(page: &P, options: &SettleOptions) -> SettleReport {
    let mut report = SettleReport::default();

    click_all(page, "spoiler", &options.spoiler, options.click_pause, &mut report);
    click_all(page, "show more", &options.show_more, options.click_pause, &mut report);

    match page.scroll_to_bottom() {
        Ok(()) => {
            report.scrolled = true;
            page.pause(options.scroll_pause);
        }
        Err(err) => {
            tracing::warn!("Scroll to bottom failed: {err}");
            report.failed += 1;
        }
    }

    tracing::debug!(?report, "dynamic content settled");
    report
}

/// Click every visible button matching `markers`, isolating each element.
fn click_all<P: PageSession>(
    page: &P,
    phase: &str,
    markers: &ButtonMarkers,
    pause: Duration,
    report: &mut SettleReport,
) {
    if markers.is_empty() {
        return;
    }

    let elements = match page.find_by_xpath(&markers.to_xpath()) {
        Ok(elements) => elements,
        Err(err) => {
            tracing::warn!(phase, "Button lookup failed: {err}");
            report.failed += 1;
            return;
        }
    };
    tracing::debug!(phase, found = elements.len(), "buttons found");

    for element in &elements {
        match click_if_displayed(page, element) {
            Ok(true) => {
                report.clicked += 1;
                page.pause(pause);
            }
            Ok(false) => {}
            Err(err) => {
                tracing::debug!(phase, "Skipping button: {err}");
                report.failed += 1;
            }
        }
    }
}

fn click_if_displayed<P: PageSession>(page: &P, element: &P::Element<'_>) -> Result<bool, StepError> {
    if !page.is_displayed(element)? {
        return Ok(false);
    }
    page.click(element)?;
    Ok(true)
}

const IS_DISPLAYED_JS: &str = "function() {
    const style = window.getComputedStyle(this);
    const rect = this.getBoundingClientRect();
    return style.display !== 'none' && style.visibility !== 'hidden' && rect.width > 0 && rect.height > 0;
}";

const CLICK_JS: &str = "function() { this.click(); }";

const SCROLL_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Script counting the nodes an XPath expression selects.
fn xpath_count_js(xpath: &str) -> String {
    // A JSON string is a valid JS string literal.
    let literal = serde_json::Value::String(xpath.to_string()).to_string();
    format!(
        "document.evaluate({literal}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength"
    )
}

fn match_count(value: Option<&serde_json::Value>) -> usize {
    value
        .and_then(serde_json::Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

// The driver reports an empty XPath search as an error, so matches are
// counted first and a page without the buttons yields an empty list.
impl PageSession for Tab {
    type Element<'a> = headless_chrome::Element<'a>;

    fn find_by_xpath(&self, xpath: &str) -> Result<Vec<Self::Element<'_>>, StepError> {
        let counted = self
            .evaluate(&xpath_count_js(xpath), false)
            .map_err(|err| StepError::new("element count", err))?;
        if match_count(counted.value.as_ref()) == 0 {
            return Ok(Vec::new());
        }
        self.find_elements_by_xpath(xpath)
            .map_err(|err| StepError::new("element lookup", err))
    }

    fn is_displayed(&self, element: &Self::Element<'_>) -> Result<bool, StepError> {
        let result = element
            .call_js_fn(IS_DISPLAYED_JS, Vec::new(), false)
            .map_err(|err| StepError::new("visibility check", err))?;
        Ok(result
            .value
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    fn click(&self, element: &Self::Element<'_>) -> Result<(), StepError> {
        element
            .call_js_fn(CLICK_JS, Vec::new(), false)
            .map(|_| ())
            .map_err(|err| StepError::new("click", err))
    }

    fn scroll_to_bottom(&self) -> Result<(), StepError> {
        self.evaluate(SCROLL_JS, false)
            .map(|_| ())
            .map_err(|err| StepError::new("scroll", err))
    }
}
