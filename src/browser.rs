// File: browser.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use headless_chrome::{Browser, LaunchOptions, Tab};
use log::debug;
use std::ffi::OsStr;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::errors::BrowserError;

/// The handful of page interactions the scraper needs from a browser.
///
/// A session is bound to one page and cannot serve two navigations at
/// once, so every method takes `&mut self`.
pub trait PortalSession: Send {
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Inner HTML of the form element named `field`, `None` if absent.
    fn field_html(&mut self, field: &str) -> Result<Option<String>, BrowserError>;

    fn select_option(&mut self, field: &str, value: &str) -> Result<(), BrowserError>;

    fn submit(&mut self) -> Result<(), BrowserError>;

    /// Inner HTML of every `<table>` on the page, in document order.
    fn read_tables(&mut self) -> Result<Vec<String>, BrowserError>;

    fn close(&mut self) -> Result<(), BrowserError> {
        Ok(())
    }
}

pub trait SessionFactory: Send + Sync {
    fn open(&self) -> Result<Box<dyn PortalSession>, BrowserError>;
}

pub const SEARCH_BUTTON: &str = "btnRechercher";

/// How long a selection may take to start reloading the form. Selections
/// that only update the page in place are done once this elapses.
const SELECT_SETTLE: Duration = Duration::from_millis(1500);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Set on the current document before an action; a fresh document lacks it.
const MARK_DOCUMENT: &str = "window.__eauxStale = true; true";
const DOCUMENT_REPLACED: &str =
    "window.__eauxStale === undefined && document.readyState === 'complete'";

pub struct ChromeSessionFactory {
    headless: bool,
    timeout: Duration,
}

impl ChromeSessionFactory {
    pub fn new(headless: bool, timeout: Duration) -> Self {
        Self { headless, timeout }
    }
}

impl SessionFactory for ChromeSessionFactory {
    fn open(&self) -> Result<Box<dyn PortalSession>, BrowserError> {
        let session = ChromeSession::launch(self.headless, self.timeout)?;
        Ok(Box::new(session))
    }
}

pub struct ChromeSession {
    _browser: Browser,
    tab: Arc<Tab>,
    timeout: Duration,
}

impl ChromeSession {
    pub fn launch(headless: bool, timeout: Duration) -> Result<Self, BrowserError> {
        debug!("Launching chrome (headless: {})", headless);

        let options = LaunchOptions::default_builder()
            .headless(headless)
            .args(vec![OsStr::new("--disable-gpu")])
            .idle_browser_timeout(timeout.max(Duration::from_secs(60)))
            .build()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| BrowserError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        tab.set_default_timeout(timeout);

        Ok(Self {
            _browser: browser,
            tab,
            timeout,
        })
    }

    fn evaluate(&self, action: &str, script: &str) -> Result<Option<serde_json::Value>, BrowserError> {
        let object = self
            .tab
            .evaluate(script, false)
            .map_err(|e| BrowserError::interaction(action, e))?;
        Ok(object.value)
    }

    fn mark_document(&self, action: &str) -> Result<(), BrowserError> {
        self.evaluate(action, MARK_DOCUMENT)?;
        Ok(())
    }

    /// Waits up to `within` for the marked document to be replaced by a
    /// fully loaded one. `Ok(false)` when it never was.
    fn wait_for_reload(&self, within: Duration) -> Result<bool, BrowserError> {
        poll_until(within, POLL_INTERVAL, || {
            // The old document may be torn down mid-evaluation; retry.
            Ok(matches!(
                self.tab.evaluate(DOCUMENT_REPLACED, false),
                Ok(object) if object.value == Some(serde_json::Value::Bool(true))
            ))
        })
    }
}

/// Calls `check` every `interval` until it returns `true` or `timeout`
/// has elapsed. Returns whether the condition was met.
fn poll_until<E>(
    timeout: Duration,
    interval: Duration,
    mut check: impl FnMut() -> Result<bool, E>,
) -> Result<bool, E> {
    let deadline = Instant::now() + timeout;
    loop {
        if check()? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        thread::sleep(interval);
    }
}

fn by_name(field: &str) -> String {
    format!("[name='{}']", field)
}

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

impl PortalSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| BrowserError::Navigate {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    fn field_html(&mut self, field: &str) -> Result<Option<String>, BrowserError> {
        let script = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.innerHTML : null; }})()",
            js_string(&by_name(field))
        );
        let value = self.evaluate("read field", &script)?;
        Ok(value.and_then(|v| v.as_str().map(str::to_string)))
    }

    fn select_option(&mut self, field: &str, value: &str) -> Result<(), BrowserError> {
        let script = format!(
            "(() => {{ \
                const select = document.querySelector({}); \
                if (!select) return false; \
                const option = Array.from(select.options).find(o => o.value === {}); \
                if (!option) return false; \
                select.value = option.value; \
                select.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                return true; \
            }})()",
            js_string(&by_name(field)),
            js_string(value)
        );

        self.mark_document("select option")?;
        match self.evaluate("select option", &script)? {
            Some(serde_json::Value::Bool(true)) => {}
            _ => {
                return Err(BrowserError::ElementNotFound {
                    selector: format!("{} option[value='{}']", by_name(field), value),
                })
            }
        }

        let settle = self.timeout.min(SELECT_SETTLE);
        if !self.wait_for_reload(settle)? {
            debug!("{}={} updated the page in place", field, value);
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<(), BrowserError> {
        let selector = by_name(SEARCH_BUTTON);
        let button = self
            .tab
            .wait_for_element(&selector)
            .map_err(|_| BrowserError::ElementNotFound {
                selector: selector.clone(),
            })?;
        self.mark_document("submit")?;
        button
            .click()
            .map_err(|e| BrowserError::interaction("submit", e))?;

        // Reading tables off the previous page would store another
        // commune's results under this one.
        if !self.wait_for_reload(self.timeout)? {
            return Err(BrowserError::interaction(
                "submit",
                format!("result page did not load within {:?}", self.timeout),
            ));
        }
        Ok(())
    }

    fn read_tables(&mut self) -> Result<Vec<String>, BrowserError> {
        let script =
            "JSON.stringify(Array.from(document.querySelectorAll('table')).map(t => t.innerHTML))";
        let json = self
            .evaluate("read tables", script)?
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "[]".to_string());

        serde_json::from_str(&json).map_err(|e| BrowserError::interaction("read tables", e))
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        self.tab
            .close(true)
            .map_err(|e| BrowserError::interaction("close", e))?;
        Ok(())
    }
}
