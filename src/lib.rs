// src/lib.rs

//! Wuxia news watcher library.
//!
//! Fetches the provider's news listing, converts notices to Markdown and
//! reports each new notice once.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
