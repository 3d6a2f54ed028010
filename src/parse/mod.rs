//! Page parsing.

mod keywords;

pub use keywords::extract_keywords;
