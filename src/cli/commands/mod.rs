//! CLI command implementations

pub mod config;
pub mod diff;
pub mod explain;
pub mod key;
mod resolve;

pub use config::execute as config;
pub use diff::execute as diff;
pub use explain::execute as explain;
pub use key::execute as key;
