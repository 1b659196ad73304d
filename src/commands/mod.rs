pub mod add;
pub mod common;
pub mod delete;
pub mod list;
pub mod menu;
pub mod move_cmd;
