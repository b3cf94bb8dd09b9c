pub mod board;
pub mod clients;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod shell;
