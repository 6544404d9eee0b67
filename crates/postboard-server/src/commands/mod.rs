//! Command handlers

pub mod config;
pub mod export;
pub mod post;
pub mod serve;
