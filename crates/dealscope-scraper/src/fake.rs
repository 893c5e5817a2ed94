//! In-memory stand-in for the browser driver, used by unit tests.
//!
//! Pages are selector→elements tables; elements carry text, attributes,
//! and their own child tables. Sessions record navigations, scrolls, and
//! close calls so tests can assert on driver interaction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::driver::{BrowserSession, DriverError, Element, SessionProvider};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement {
    text: String,
    attributes: HashMap<String, String>,
    children: HashMap<String, Vec<FakeElement>>,
}

impl FakeElement {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            ..Self::default()
        }
    }

    pub(crate) fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    pub(crate) fn with_child(mut self, selector: &str, child: FakeElement) -> Self {
        self.children.entry(selector.to_owned()).or_default().push(child);
        self
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn text(&self) -> Result<String, DriverError> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, DriverError> {
        Ok(self.attributes.get(name).cloned())
    }

    async fn find(&self, selector: &str) -> Result<Option<Box<dyn Element>>, DriverError> {
        Ok(self
            .children
            .get(selector)
            .and_then(|matches| matches.first())
            .cloned()
            .map(|e| Box::new(e) as Box<dyn Element>))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, DriverError> {
        Ok(self
            .children
            .get(selector)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|e| Box::new(e) as Box<dyn Element>)
            .collect())
    }

    async fn click(&self) -> Result<(), DriverError> {
        Ok(())
    }
}

pub(crate) struct FakeSession {
    elements: Mutex<HashMap<String, Vec<FakeElement>>>,
    pub(crate) navigations: Arc<Mutex<Vec<String>>>,
    pub(crate) close_count: Arc<AtomicUsize>,
    fail_navigation: bool,
}

impl FakeSession {
    pub(crate) fn new() -> Self {
        Self {
            elements: Mutex::new(HashMap::new()),
            navigations: Arc::new(Mutex::new(Vec::new())),
            close_count: Arc::new(AtomicUsize::new(0)),
            fail_navigation: false,
        }
    }

    /// A session whose every navigation fails, simulating a dead site.
    pub(crate) fn failing_navigation() -> Self {
        Self {
            fail_navigation: true,
            ..Self::new()
        }
    }

    pub(crate) fn with_elements(self, selector: &str, elements: Vec<FakeElement>) -> Self {
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(selector.to_owned(), elements);
        self
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        if self.fail_navigation {
            return Err(DriverError::Navigation {
                url: url.to_owned(),
                reason: "connection refused".to_owned(),
            });
        }
        self.navigations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_owned());
        Ok(())
    }

    async fn scroll_by(&self, _delta_px: i64) -> Result<(), DriverError> {
        Ok(())
    }

    async fn find(&self, selector: &str) -> Result<Option<Box<dyn Element>>, DriverError> {
        Ok(self
            .elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(selector)
            .and_then(|matches| matches.first())
            .cloned()
            .map(|e| Box::new(e) as Box<dyn Element>))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, DriverError> {
        Ok(self
            .elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(selector)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|e| Box::new(e) as Box<dyn Element>)
            .collect())
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out a single prepared session, then fails further acquisitions.
pub(crate) struct FakeProvider {
    session: Mutex<Option<FakeSession>>,
    fail_acquire: bool,
}

impl FakeProvider {
    pub(crate) fn new(session: FakeSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            fail_acquire: false,
        }
    }

    /// A provider that cannot start a browser at all.
    pub(crate) fn unavailable() -> Self {
        Self {
            session: Mutex::new(None),
            fail_acquire: true,
        }
    }
}

#[async_trait]
impl SessionProvider for FakeProvider {
    async fn acquire(&self) -> Result<Box<dyn BrowserSession>, DriverError> {
        if self.fail_acquire {
            return Err(DriverError::SessionLost(
                "browser binary not found".to_owned(),
            ));
        }
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .map(|s| Box::new(s) as Box<dyn BrowserSession>)
            .ok_or_else(|| DriverError::SessionLost("session already taken".to_owned()))
    }
}
