use glam::DVec2;
use std::f64::consts::PI;

use crate::defs::{
    Sound, ITEM_BOB_AMPLITUDE, ITEM_BOB_FREQUENCY, ITEM_SCALE, PLAYER_RADIUS,
};
use crate::renderer::{SpriteImage, SpritePool};
use crate::sim::player::Player;
use crate::sim::sounds::{distance_volume, SoundEvent, SoundQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Key,
    Bomb,
}

/// Walk-through pickup. Dead items stay in the list but do nothing;
/// pickup is one-way.
#[derive(Debug, Clone, Copy)]
pub struct Item {
    pub kind: ItemKind,
    pub image: SpriteImage,
    pub position: DVec2,
    pub alive: bool,
}

impl Item {
    pub fn new(kind: ItemKind, image: SpriteImage, position: DVec2) -> Self {
        Self {
            kind,
            image,
            position,
            alive: true,
        }
    }
}

/// Pickup check plus the bobbing billboard for everything still alive.
/// `time` is the accumulated simulation clock, which phases the bob per
/// item through its coordinates.
pub fn update_items(
    items: &mut [Item],
    player: &Player,
    time: f64,
    sprites: &mut SpritePool,
    sounds: &mut SoundQueue,
) {
    for item in items.iter_mut() {
        if item.alive
            && player.position.distance_squared(item.position) < PLAYER_RADIUS * PLAYER_RADIUS
        {
            item.alive = false;
            sounds.push(SoundEvent {
                sound: Sound::ItemPickup,
                volume: distance_volume(player.position, item.position),
            });
        }

        if item.alive {
            let z = 0.25 + ITEM_BOB_AMPLITUDE
                - ITEM_BOB_AMPLITUDE
                    * (ITEM_BOB_FREQUENCY * PI * time + item.position.x + item.position.y).sin();
            sprites.push(item.image, item.position, z, ITEM_SCALE);
        }
    }
}
