pub mod cli;
pub mod config;
pub mod format;
pub mod layout;
pub mod logging;
pub mod render;
pub mod system;
pub mod terminal;
