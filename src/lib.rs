pub mod api;
pub mod clipboard;
pub mod error;
pub mod messages;
pub mod parser;
pub mod paths;
pub mod settings;
pub mod tui;
pub mod worker;
