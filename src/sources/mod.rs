//! Alternative text sources to scraping the site.

pub mod spreadsheet;
