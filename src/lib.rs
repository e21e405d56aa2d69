// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod diff;
pub mod error;
pub mod file;
pub mod log;
pub mod model;
pub mod normalize;
pub mod progress;
pub mod queries;
pub mod runner;
pub mod scrape;
pub mod store;
