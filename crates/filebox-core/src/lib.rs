pub mod config;
pub mod logging;

pub mod actions;
pub mod checksum;
pub mod clipboard;
pub mod download;
pub mod http;
pub mod notify;
pub mod save;
pub mod upload;
