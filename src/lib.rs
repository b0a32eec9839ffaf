//! # Diary Inline Bot
//!
//! Inline keyboard core for the school diary Telegram bot.
//!
//! ## Features
//! - Button descriptors compiled into native inline keyboards
//! - Callback registry mapping opaque tokens to bound actions, with expiry
//! - Paginated screens with windowed page navigation
//! - A single dispatch entry point for every button click
//! - Background sweeper that purges expired callbacks

/// Bot command handlers and update routing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Callback registry, markup compiler, paginator and dispatch
pub mod inline;
/// Background services: expiry sweeper and health endpoints
pub mod services;
/// Logging helpers and validation
pub mod utils;
