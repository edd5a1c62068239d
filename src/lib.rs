pub mod client;
pub mod config;
pub mod download;
pub mod events;
pub mod handler;
pub mod humanize;
pub mod observability;
pub mod page;
pub mod ui;
