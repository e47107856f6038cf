mod raycast;
mod scene;
mod texture;

pub use raycast::{cast_ray, hitting_cell, ray_step, sign, snap};
pub use scene::{Scene, Tile};
pub use texture::{Texture, TextureBank, TextureError, TextureId, MISSING_TEXTURE};
