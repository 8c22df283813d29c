pub mod common;
pub mod merge;

pub use common::RunOptions;
pub use merge::Merge;
