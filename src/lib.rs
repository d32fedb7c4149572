//! bocha-search library
//!
//! Chinese web, English web and AI-augmented search tools that report
//! progress and citations to an optional listener while they run.

pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod search;
pub mod tool;
