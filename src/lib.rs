//! Arcade driving game core: a car dodges bars scrolling down a road.
//!
//! [`game::Session`] owns all game state and advances it one frame at a
//! time; drawing goes through the [`render::Renderer`] trait.

pub mod config;
pub mod game;
pub mod render;
