//! Rock Splitter: a wrap-around asteroids game core with a terminal frontend.
//!
//! [`world::World`] owns the whole simulation and is advanced one tick at a
//! time from an [`input::InputFrame`]. Drawing goes through the
//! [`rendering::Renderer`] trait, so the core runs headless in tests.

pub mod audio;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod rendering;
pub mod shapes;
pub mod terminal_io;
pub mod types;
pub mod upgrades;
pub mod weapons;
pub mod world;
