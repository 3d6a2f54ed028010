//! URL resolution: eligibility policy and normalization.
//!
//! The resolver is consulted twice per detection: on the URL the caller asked
//! for and on the URL actually served after the single redirect hop.

mod filter;
mod normalize;

pub use filter::UrlFilter;
pub use normalize::{is_cross_origin, normalize_url, prepare_url};
