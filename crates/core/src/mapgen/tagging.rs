//! Semantic room tagging: boss, treasure, and safe rooms.

use tracing::debug;

use crate::config::TaggingConfig;
use crate::dungeon::Room;
use crate::rng::DungeonRng;
use crate::types::RoomTag;

use super::model::TagSummary;

/// Re-tags `rooms` from scratch. Returns `None` for an empty room list.
///
/// The largest room becomes the boss room, the next `treasure_count` largest
/// become treasure rooms (equal areas keep list order), and `safe_count` of
/// the rest are drawn at random as safe rooms.
pub fn tag_rooms(
    rooms: &mut [Room],
    config: &TaggingConfig,
    rng: &mut DungeonRng,
) -> Option<TagSummary> {
    if rooms.is_empty() {
        return None;
    }
    for room in rooms.iter_mut() {
        room.tag = RoomTag::Normal;
    }

    let mut by_area: Vec<(usize, usize)> =
        rooms.iter().enumerate().map(|(index, room)| (index, room.area())).collect();
    by_area.sort_by(|left, right| right.1.cmp(&left.1));
    let mut ranked = by_area.into_iter().map(|(index, _)| index);

    let mut summary = TagSummary::default();
    if let Some(boss) = ranked.next() {
        rooms[boss].tag = RoomTag::Boss;
        summary.boss = Some(boss);
    }
    for index in ranked.by_ref().take(config.treasure_count) {
        rooms[index].tag = RoomTag::Treasure;
        summary.treasure.push(index);
    }

    let mut remaining: Vec<usize> = ranked.collect();
    rng.shuffle(&mut remaining);
    for &index in remaining.iter().take(config.safe_count) {
        rooms[index].tag = RoomTag::Safe;
        summary.safe.push(index);
    }

    debug!(
        rooms = rooms.len(),
        boss = ?summary.boss,
        treasure = summary.treasure.len(),
        safe = summary.safe.len(),
        "rooms tagged"
    );
    Some(summary)
}
