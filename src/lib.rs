pub mod cli;
pub mod config;
pub mod executor;
pub mod fetch;
pub mod host;
pub mod policy;
pub mod report;
pub mod result;
pub mod sink;
pub mod util;
