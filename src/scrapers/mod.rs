//! Page sources and per-page extraction.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | NOS Teletekst | [`teletext`] | JSON endpoint, HTML `content` scanned by span colour |
//!
//! A source implements [`teletext::PageSource`]; [`teletext::PageExtractor`]
//! turns whatever it fetches into a [`crate::models::NewsItem`].

pub mod teletext;
