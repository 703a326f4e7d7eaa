pub mod board;
pub mod end_screen;
pub mod entity;
pub mod status_bar;
pub mod tile;
