pub mod cli;
pub mod config;
pub mod models;
pub mod session;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use cli::Command;
