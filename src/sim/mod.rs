mod bombs;
mod items;
mod particles;
mod player;
mod sounds;

pub use bombs::{update_bombs, Bomb, BombPool};
pub use items::{update_items, Item, ItemKind};
pub use particles::{update_particles, Particle, ParticlePool};
pub use player::{InputState, Player};
pub use sounds::{distance_volume, AudioSink, NullSink, SoundEvent, SoundQueue};
