// src/config/mod.rs
pub mod ai;
pub mod feed;

pub use ai::AiConfig;
pub use feed::FeedConfig;
