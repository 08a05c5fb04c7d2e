// src/infrastructure/mod.rs
pub mod config;
pub mod flashcard_parser;
pub mod http_gateway;
pub mod session_store;

pub use config::Config;
pub use http_gateway::HttpGateway;
pub use session_store::{FileSessionStore, MemorySessionStore};
