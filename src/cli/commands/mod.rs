pub mod config;
pub mod conversation;
pub mod export;
pub mod init;
pub mod list;
pub mod ping;
pub mod record;
pub mod report;
pub mod stats;
