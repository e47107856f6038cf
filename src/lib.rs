//! Software raycasting engine for a grid-based world.
//!
//! A 2-D tile map is rendered into a first-person view the classic way:
//! one ray per screen column, vertical wall strips, perspective-correct
//! floor and ceiling rows, billboarded sprites depth-tested against a
//! per-column z-buffer, and a minimap overlay.
//!
//! The crate is a library: it draws into an RGBA8 back buffer and emits
//! sound requests through a sink trait. Windowing, input capture and
//! audio playback live in the host (see `src/bin/play.rs`).

pub mod defs;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;

pub use engine::Game;
pub use renderer::Display;
pub use sim::{AudioSink, InputState, Item, ItemKind, NullSink, Player};
pub use world::{Scene, Texture, TextureBank, Tile};
