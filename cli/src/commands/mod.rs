//! Command implementations

pub mod apps;
pub mod config;
pub mod domains;
pub mod logs;
pub mod run;
pub mod scale;
pub mod version;
