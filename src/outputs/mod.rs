//! Output generation for the cached news items.
//!
//! - [`html`]: renders the cached items as a single self-contained HTML page
//!
//! # Output Structure
//!
//! ```text
//! cache_dir/
//! └── news-items.json   # written by `scrape`, read by `render`
//!
//! --output news.html    # written by `render`, or stdout
//! ```

pub mod html;
