pub mod args;
pub mod menu;
