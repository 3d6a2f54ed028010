//! Portal service HTTP handlers.

mod detect;
mod status;

pub use detect::{detect_handler, detect_with_path_handler};
pub use status::status_handler;
