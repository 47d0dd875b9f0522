pub mod activity;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod platform;
pub mod storage;
pub mod theme;
