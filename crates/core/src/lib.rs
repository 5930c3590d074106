//! Shared configuration types for the brewmap cafe directory service.

pub mod config;

pub use config::AppConfig;
