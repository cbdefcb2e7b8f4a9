pub mod audio;
pub mod background;
pub mod collision;
pub mod config;
pub mod driver;
pub mod effects;
pub mod enemy;
pub mod entities;
pub mod input;
pub mod player;
pub mod session;
pub mod surface;
pub mod ui;
pub mod world;
