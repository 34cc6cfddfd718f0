pub mod command;
pub mod coordinator;
pub mod merge;

pub use command::{apply, Command};
pub use coordinator::Coordinator;
pub use merge::merge;
