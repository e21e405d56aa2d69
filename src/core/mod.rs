// src/core/mod.rs

pub mod header;
pub mod net;
pub mod sanitize;

pub use header::HeaderIndex;
