pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod manual;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod storage;
pub mod views;

pub use cli::{Cli, Commands};
pub use error::{Error, Result};
pub use ledger::{apply, Command, Coordinator};
pub use storage::Storage;
