pub mod bundle;
pub mod dataset;
pub mod entities;

pub use bundle::*;
pub use dataset::*;
pub use entities::*;
