pub mod cli;
pub mod command_handlers;
pub mod draft;
