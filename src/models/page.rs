// src/models/page.rs

//! Listing page addressing.
//!
//! The provider numbers its listing pages in two ways. The three most recent
//! pages are "current" and addressed by their ordinal (`1`, `2`, `3`). Every
//! older page is "historical" and addressed by an offset counted back from the
//! oldest page, rendered with an `n` prefix (`n1` is the oldest page of all).
//!
//! Both schemes map onto one absolute position `1..=total`:
//!
//! ```text
//! position:  1   2   3   4        5          ...  total
//! rendered:  1   2   3   n{t-3}   n{t-4}     ...  n1
//! ```
//!
//! `total` is only known after a discovery probe, so it lives in an explicit
//! [`PageCatalog`] rather than in global state.

use std::fmt;

use crate::error::{AppError, Result};

/// Number of pages addressed by bare ordinals.
pub const CURRENT_PAGES: u32 = 3;

/// How a page is addressed by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// One of the newest pages, addressed by its ordinal.
    Current(u32),
    /// An older page, addressed by its offset from the oldest page.
    Historical(u32),
}

/// One listing page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageIndex {
    position: u32,
    kind: PageKind,
}

impl PageIndex {
    /// The newest listing page.
    pub const FIRST: PageIndex = PageIndex {
        position: 1,
        kind: PageKind::Current(1),
    };

    /// Build a current page index. Needs no discovery.
    pub fn current(ordinal: u32) -> Result<Self> {
        if ordinal < 1 {
            return Err(AppError::index("page ordinal below minimum"));
        }
        if ordinal > CURRENT_PAGES {
            return Err(AppError::index(format!(
                "page {ordinal} is historical and needs a discovered catalog"
            )));
        }
        Ok(Self {
            position: ordinal,
            kind: PageKind::Current(ordinal),
        })
    }

    /// Absolute position, `1` being the newest page.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn is_historical(&self) -> bool {
        matches!(self.kind, PageKind::Historical(_))
    }
}

impl Default for PageIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PageKind::Current(ordinal) => write!(f, "{ordinal}"),
            PageKind::Historical(offset) => write!(f, "n{offset}"),
        }
    }
}

/// Result of pagination discovery: how many listing pages exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCatalog {
    total: u32,
}

impl PageCatalog {
    /// Build a catalog from the offset of the newest historical page, which is
    /// the page linked as "next" from the last current page.
    pub fn from_newest_historical(offset: u32) -> Result<Self> {
        let total = offset.checked_add(CURRENT_PAGES).ok_or_else(|| {
            AppError::parse("discovery", format!("historical offset {offset} out of range"))
        })?;
        Ok(Self { total })
    }

    /// Build a catalog from a known page total.
    pub fn with_total(total: u32) -> Result<Self> {
        if total < CURRENT_PAGES {
            return Err(AppError::index(format!(
                "page total {total} is below the {CURRENT_PAGES} current pages"
            )));
        }
        Ok(Self { total })
    }

    /// Total number of listing pages.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Resolve an absolute ordinal. Positions past the current pages are
    /// reclassified as historical.
    pub fn page(&self, ordinal: u32) -> Result<PageIndex> {
        self.at(i64::from(ordinal))
    }

    /// Resolve a historical offset (`n<offset>`).
    pub fn historical(&self, offset: u32) -> Result<PageIndex> {
        self.at(i64::from(self.total) - i64::from(offset) + 1)
    }

    /// Resolve provider text: a bare ordinal or an `n`-prefixed offset.
    pub fn resolve(&self, raw: &str) -> Result<PageIndex> {
        let raw = raw.trim();
        let (digits, historical) = match raw.strip_prefix('n') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        let value: u32 = digits
            .parse()
            .map_err(|_| AppError::index(format!("invalid page index '{raw}'")))?;

        if historical {
            self.historical(value)
        } else {
            self.page(value)
        }
    }

    /// The next older page.
    pub fn next(&self, index: PageIndex) -> Result<PageIndex> {
        if index.position >= self.total {
            return Err(AppError::index("page index above maximum"));
        }
        self.at(i64::from(index.position) + 1)
    }

    /// The next newer page.
    pub fn previous(&self, index: PageIndex) -> Result<PageIndex> {
        if index.position <= 1 {
            return Err(AppError::index("page index below minimum"));
        }
        self.at(i64::from(index.position) - 1)
    }

    fn at(&self, position: i64) -> Result<PageIndex> {
        if position < 1 {
            return Err(AppError::index("page index below minimum"));
        }
        if position > i64::from(self.total) {
            return Err(AppError::index(format!(
                "page index above maximum {}",
                self.total
            )));
        }

        let position = position as u32;
        let kind = if position <= CURRENT_PAGES {
            PageKind::Current(position)
        } else {
            PageKind::Historical(self.total - position + 1)
        };
        Ok(PageIndex { position, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PageCatalog {
        PageCatalog::with_total(20).unwrap()
    }

    #[test]
    fn test_current_pages_resolve_as_ordinals() {
        let catalog = catalog();
        for k in 1..=3 {
            let index = catalog.page(k).unwrap();
            assert!(!index.is_historical());
            assert_eq!(index.to_string(), k.to_string());
        }
    }

    #[test]
    fn test_older_pages_become_historical() {
        let catalog = catalog();
        let index = catalog.page(4).unwrap();
        assert!(index.is_historical());
        assert_eq!(index.to_string(), "n17");

        let oldest = catalog.page(20).unwrap();
        assert_eq!(oldest.to_string(), "n1");
    }

    #[test]
    fn test_out_of_range_is_index_error() {
        let catalog = catalog();
        assert!(matches!(catalog.page(0), Err(AppError::Index(_))));
        assert!(matches!(catalog.page(21), Err(AppError::Index(_))));
        assert!(matches!(catalog.historical(0), Err(AppError::Index(_))));
        assert!(matches!(catalog.historical(21), Err(AppError::Index(_))));
        assert!(matches!(catalog.resolve("abc"), Err(AppError::Index(_))));
        assert!(matches!(catalog.resolve("n-1"), Err(AppError::Index(_))));
    }

    #[test]
    fn test_resolve_prefixed_offset() {
        let catalog = catalog();
        let index = catalog.resolve("n5").unwrap();
        assert_eq!(index.position(), 16);
        assert_eq!(index.kind(), PageKind::Historical(5));
    }

    #[test]
    fn test_historical_offset_landing_on_current_page_is_normalized() {
        let catalog = catalog();
        let index = catalog.resolve("n18").unwrap();
        assert_eq!(index, PageIndex::current(3).unwrap());
    }

    #[test]
    fn test_rendering_round_trips() {
        let catalog = catalog();
        for position in 1..=catalog.total() {
            let index = catalog.page(position).unwrap();
            assert_eq!(catalog.resolve(&index.to_string()).unwrap(), index);
        }
    }

    #[test]
    fn test_next_and_previous() {
        let catalog = catalog();
        let third = PageIndex::current(3).unwrap();
        assert_eq!(catalog.next(third).unwrap().to_string(), "n17");
        assert_eq!(catalog.previous(third).unwrap().to_string(), "2");

        assert!(catalog.previous(PageIndex::FIRST).is_err());
        let last = catalog.page(20).unwrap();
        assert!(catalog.next(last).is_err());
    }

    #[test]
    fn test_current_without_catalog() {
        assert_eq!(PageIndex::current(1).unwrap(), PageIndex::FIRST);
        assert!(PageIndex::current(0).is_err());
        assert!(PageIndex::current(4).is_err());
    }

    #[test]
    fn test_catalog_from_discovery() {
        let catalog = PageCatalog::from_newest_historical(617).unwrap();
        assert_eq!(catalog.total(), 620);
        assert_eq!(catalog.page(4).unwrap().to_string(), "n617");
        assert!(PageCatalog::from_newest_historical(u32::MAX).is_err());
    }
}
