pub mod config;
pub mod core;
pub mod errors;
pub mod journal;
pub mod models;
pub mod reporting;
pub mod store;
#[cfg(test)]
pub mod test_helpers;
pub mod trading;
