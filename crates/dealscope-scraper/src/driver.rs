//! The browser-driver boundary.
//!
//! The pipeline never talks to a real browser directly; it drives these
//! object-safe traits, which the embedding application implements over its
//! headless-browser stack. A selector that matches nothing is a normal
//! `Ok(None)` / empty-vec outcome, never an error — ordered fallback chains
//! depend on misses being cheap.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("driver command failed: {0}")]
    Command(String),

    #[error("browser session lost: {0}")]
    SessionLost(String),
}

/// A handle to one DOM-like element on the current page.
#[async_trait]
pub trait Element: Send + Sync {
    /// Visible text content, trimmed by the driver.
    async fn text(&self) -> Result<String, DriverError>;

    /// Attribute value, `None` when absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>, DriverError>;

    /// First descendant matching `selector`, `None` on a miss.
    async fn find(&self, selector: &str) -> Result<Option<Box<dyn Element>>, DriverError>;

    /// All descendants matching `selector`; empty on a miss.
    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, DriverError>;

    /// Clicks the element. Used only for interstitial dismissal.
    async fn click(&self) -> Result<(), DriverError>;
}

/// One exclusive browsing context.
///
/// A session serves exactly one run at a time; adapters within a run share
/// it sequentially. Whoever acquires a session is responsible for calling
/// [`BrowserSession::close`] on every exit path.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// Scrolls the viewport vertically by `delta_px` (negative scrolls up).
    async fn scroll_by(&self, delta_px: i64) -> Result<(), DriverError>;

    /// First element matching `selector` on the page, `None` on a miss.
    async fn find(&self, selector: &str) -> Result<Option<Box<dyn Element>>, DriverError>;

    /// All elements matching `selector` on the page; empty on a miss.
    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, DriverError>;

    /// Releases the browsing context. Idempotence is not required of
    /// implementations; callers must close exactly once.
    async fn close(&self) -> Result<(), DriverError>;
}

/// Source of browser sessions for the orchestrator.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Acquires a fresh exclusive session.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] when no session can be started; the caller
    /// treats this as fatal to the run.
    async fn acquire(&self) -> Result<Box<dyn BrowserSession>, DriverError>;
}
