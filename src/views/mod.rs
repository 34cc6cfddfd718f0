//! Read-only folds over a [`Dataset`](crate::model::Dataset)

pub mod averages;
pub mod box_score;
pub mod dashboard;

pub use averages::{player_averages, AveragesTable, PlayerAverages};
pub use box_score::{box_score, BoxScore};
pub use dashboard::{dashboard, Dashboard};
