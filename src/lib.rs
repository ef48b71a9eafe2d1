//! # Reminder Bot
//!
//! A Telegram bot that registers chats, stores reminders and converts audio
//! links to MP3.
//!
//! ## Features
//! - `/start` registration, one user per chat
//! - `/remind` stores a reminder with a `YYYY-MM-DD HH:MM` timestamp
//! - `/download_mp3` downloads a link's audio and sends it back as MP3
//! - Persistent storage with SQLite

/// Bot commands, the command table and dispatch schema
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Error types shared by handlers and services
pub mod error;
/// Registration, reminders, the media pipeline and health checks
pub mod services;
/// Utility functions for datetime, validation, logging and replies
pub mod utils;
