pub mod command;
pub mod offline;
pub mod render;
