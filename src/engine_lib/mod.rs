// src/engine_lib/mod.rs

pub mod controller;
pub mod map;
pub mod player;
pub mod raycaster;

pub use controller::PlayerController;
pub use map::Map;
pub use player::Player;
pub use raycaster::Raycaster;
