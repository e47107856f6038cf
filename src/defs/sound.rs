/// Sound effect identifiers the simulation can request.
///
/// Playback is the host's concern; the engine only names the effect and
/// a distance-derived volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    ItemPickup,
    BombRicochet,
    BombBlast,
}
