mod assets;
mod provider;

pub mod client;
pub mod completion;
pub mod config;
pub mod export;
pub mod model;
pub mod reveal;
pub mod session;
pub mod transcript;

#[cfg(test)]
mod test_utils;

pub use crate::assets::get_log_dir;
pub use crate::provider::llm::get_completion_llm;
