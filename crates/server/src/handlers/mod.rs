//! HTTP request handlers.

pub mod cafes;
pub mod pages;

pub use cafes::*;
pub use pages::*;
