//! Location → page resolution.
//!
//! Matching is exact on the path after the query string and any trailing
//! slash are stripped. Unknown paths resolve to no page.

use std::fmt;

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Whitepaper,
    Terms,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Whitepaper, Page::Terms, Page::Home];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Whitepaper => "/whitepaper",
            Page::Terms => "/tos",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Whitepaper => "Whitepaper",
            Page::Terms => "Terms of Service",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Resolve a location to a page.
pub fn resolve(location: &str) -> Option<Page> {
    let path = route_path(location);
    Page::ALL.into_iter().find(|page| page.path() == path)
}

/// Extract the routed path: the hash fragment when present, else the path.
fn route_path(location: &str) -> &str {
    let location = location.trim();
    let path = match location.split_once('#') {
        Some((_, fragment)) => fragment,
        None => strip_origin(location),
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();

    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn strip_origin(location: &str) -> &str {
    match location.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => location,
    }
}
