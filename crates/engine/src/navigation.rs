//! Page navigation dispatch.
//!
//! The host owns the actual navigation; this module only decides which of its two
//! entry points a locator goes to.

use tracing::debug;

/// Page name the home button navigates to.
pub const HOME_PAGE: &str = "index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Absolute URL or root-relative path, opened as a full navigation.
    Url(String),
    /// Named host page.
    Page(String),
}

impl NavigationTarget {
    /// Classifies a locator. Empty locators have no target.
    pub fn from_locator(locator: &str) -> Option<Self> {
        let locator = locator.trim();
        if locator.is_empty() {
            return None;
        }
        if locator.starts_with("http") || locator.starts_with('/') {
            Some(Self::Url(locator.to_string()))
        } else {
            Some(Self::Page(locator.to_string()))
        }
    }

    pub fn home() -> Self {
        Self::Page(HOME_PAGE.to_string())
    }
}

/// Host navigation entry points.
pub trait NavigationSink {
    fn open_url(&mut self, url: &str);
    fn open_page(&mut self, page: &str);
}

pub fn dispatch<S: NavigationSink + ?Sized>(sink: &mut S, target: &NavigationTarget) {
    debug!(?target, "Dispatching navigation");
    match target {
        NavigationTarget::Url(url) => sink.open_url(url),
        NavigationTarget::Page(page) => sink.open_page(page),
    }
}

/// Navigates to `locator` when it resolves to a target, returning that target.
pub fn navigate_to_locator<S: NavigationSink + ?Sized>(sink: &mut S, locator: Option<&str>) -> Option<NavigationTarget> {
    let target = NavigationTarget::from_locator(locator?)?;
    dispatch(sink, &target);
    Some(target)
}

pub fn navigate_home<S: NavigationSink + ?Sized>(sink: &mut S) {
    dispatch(sink, &NavigationTarget::home());
}
