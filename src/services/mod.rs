//! Service layer for the notice watcher.
//!
//! This module contains the business logic for:
//! - Listing pages and pagination discovery (`ListingFetcher`)
//! - Notice bodies (`ContentFetcher`)
//! - Combined page and latest-notice fetching (`NewsService`)

mod content;
mod listing;
mod news;

pub use content::{ContentFetcher, Converter, Html2MdConverter, extract_detail, render_detail};
pub use listing::{ListingFetcher, parse_catalog, parse_listing};
pub use news::NewsService;
