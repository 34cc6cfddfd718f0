pub mod headers;
pub mod record;

pub use headers::{lookup_header, normalize_header, Column, HEADER_ALIASES};
pub use record::*;
