//! Page addresses.
//!
//! The dashboard has two pages: the landing page at `/` and one detail
//! page per commodity at `/commodity/{SYMBOL}`. Moving between them is a
//! full navigation: the old page and all of its state are discarded.

use std::fmt;

use crate::{OilwatchError, Result};

/// Symbol shown when a detail path has an empty final segment.
pub const FALLBACK_SYMBOL: &str = "WTI";

/// An addressable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The market overview.
    Landing,
    /// One commodity, keyed by its upper-cased symbol.
    Commodity(String),
}

impl Route {
    /// Parses a page path.
    ///
    /// The commodity symbol is the final path segment, upper-cased.
    ///
    /// # Errors
    ///
    /// Returns [`OilwatchError::Route`] for paths outside the two pages.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');

        if trimmed.is_empty() {
            return Ok(Route::Landing);
        }

        let mut segments = trimmed.split('/');
        match segments.next() {
            Some("commodity") => {
                let last = path.rsplit('/').next().unwrap_or_default();
                let symbol = if last.is_empty() {
                    FALLBACK_SYMBOL.to_string()
                } else {
                    last.to_uppercase()
                };
                Ok(Route::Commodity(symbol))
            }
            _ => Err(OilwatchError::Route(path.to_string())),
        }
    }

    /// Returns the canonical path of this page.
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Commodity(symbol) => commodity_path(symbol),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Path of a commodity's detail page.
pub fn commodity_path(symbol: &str) -> String {
    format!("/commodity/{symbol}")
}

/// Where a click leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Another page of this dashboard.
    Page(Route),
    /// An outside link, such as a news article's source.
    External(String),
}

/// Target of a link that may be missing.
///
/// Articles without a source URL render a link that goes nowhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    To(Navigation),
    Placeholder,
}

impl Link {
    /// Builds an outside link, or a placeholder when `url` is absent.
    pub fn external(url: Option<&str>) -> Self {
        match url {
            Some(url) if !url.is_empty() => Link::To(Navigation::External(url.to_string())),
            _ => Link::Placeholder,
        }
    }

    /// Builds a link to a commodity page.
    pub fn commodity(symbol: &str) -> Self {
        Link::To(Navigation::Page(Route::Commodity(symbol.to_string())))
    }

    /// Returns the `href` this link would carry on a web page.
    pub fn href(&self) -> String {
        match self {
            Link::To(Navigation::Page(route)) => route.path(),
            Link::To(Navigation::External(url)) => url.clone(),
            Link::Placeholder => "#".to_string(),
        }
    }

    /// Returns the navigation, if the link leads anywhere.
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            Link::To(nav) => Some(nav.clone()),
            Link::Placeholder => None,
        }
    }
}
