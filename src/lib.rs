//! Phishguard — phishing URL detection service core.

pub mod chat;
pub mod classifier;
pub mod config;
pub mod error;
pub mod http;
pub mod predict;
