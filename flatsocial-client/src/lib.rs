pub mod client;
pub mod config;
pub mod flat;
pub mod init_once;
pub mod resolver;

#[cfg(test)]
pub(crate) mod fake;
