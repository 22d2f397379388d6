pub mod config;
pub mod imageref;
pub mod labels;
pub mod logging;
pub mod retry;
pub mod runner;
pub mod tools;
