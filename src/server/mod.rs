pub mod app;
pub mod config;
pub mod core;
pub mod handlers;
pub mod middleware;

// Re-export key components for public API
pub use config::ServerConfig;
pub use core::serve;
