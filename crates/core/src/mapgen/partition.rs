//! Recursive binary space partitioning into rooms joined by corridors.
//!
//! The partition tree lives in a slot-map arena for the duration of one
//! generation call and is dropped once rooms are carved and linked.

use slotmap::{SlotMap, new_key_type};
use tracing::debug;

use crate::config::{MIN_ROOM_SIZE, PartitionConfig};
use crate::dungeon::{Dungeon, Room};
use crate::rng::DungeonRng;

use super::corridor::connect_rooms;
use super::doors::place_doors;

new_key_type! {
    pub(crate) struct NodeKey;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Region {
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

#[derive(Debug)]
struct PartitionNode {
    region: Region,
    children: Option<(NodeKey, NodeKey)>,
    room: Option<Room>,
}

#[derive(Debug)]
pub(crate) struct PartitionTree {
    nodes: SlotMap<NodeKey, PartitionNode>,
    root: NodeKey,
}

impl PartitionTree {
    /// Splits the whole `width` x `height` area down to leaves.
    pub(crate) fn build(
        width: usize,
        height: usize,
        min_leaf_size: usize,
        rng: &mut DungeonRng,
    ) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(PartitionNode {
            region: Region { x: 0, y: 0, width, height },
            children: None,
            room: None,
        });
        let mut tree = Self { nodes, root };
        tree.split(root, min_leaf_size, rng);
        tree
    }

    /// A node whose split direction leaves no room for a cut point stays a
    /// leaf, even if its other dimension is still large.
    fn split(&mut self, key: NodeKey, min_leaf_size: usize, rng: &mut DungeonRng) {
        let region = self.nodes[key].region;
        let limit = 2 * min_leaf_size;
        if region.width <= limit && region.height <= limit {
            return;
        }

        let vertical = rng.coin();
        let span = if vertical { region.width } else { region.height };
        let range = span.saturating_sub(limit);
        if range <= 1 {
            return;
        }
        let cut = min_leaf_size + rng.below(range);

        let (first, second) = if vertical {
            (
                Region { width: cut, ..region },
                Region { x: region.x + cut, width: region.width - cut, ..region },
            )
        } else {
            (
                Region { height: cut, ..region },
                Region { y: region.y + cut, height: region.height - cut, ..region },
            )
        };
        let left = self.nodes.insert(PartitionNode { region: first, children: None, room: None });
        let right = self.nodes.insert(PartitionNode { region: second, children: None, room: None });
        self.nodes[key].children = Some((left, right));

        self.split(left, min_leaf_size, rng);
        self.split(right, min_leaf_size, rng);
    }

    /// Leaves in depth-first, left-before-right order.
    pub(crate) fn leaves(&self) -> Vec<NodeKey> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            match self.nodes[key].children {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => leaves.push(key),
            }
        }
        leaves
    }

    pub(crate) fn region(&self, key: NodeKey) -> Region {
        self.nodes[key].region
    }

    pub(crate) fn set_room(&mut self, key: NodeKey, room: Room) {
        self.nodes[key].room = Some(room);
    }

    /// Pairs of rooms to link, one pair per interior node, in post-order.
    ///
    /// Each side contributes the first room found depth-first in its
    /// subtree, not the nearest one.
    pub(crate) fn sibling_links(&self) -> Vec<(Room, Room)> {
        let mut links = Vec::new();
        self.collect_links(self.root, &mut links);
        links
    }

    fn collect_links(&self, key: NodeKey, links: &mut Vec<(Room, Room)>) {
        let Some((left, right)) = self.nodes[key].children else {
            return;
        };
        self.collect_links(left, links);
        self.collect_links(right, links);
        if let (Some(from), Some(to)) = (self.first_room(left), self.first_room(right)) {
            links.push((from, to));
        }
    }

    fn first_room(&self, key: NodeKey) -> Option<Room> {
        let node = &self.nodes[key];
        if let Some(room) = node.room {
            return Some(room);
        }
        let (left, right) = node.children?;
        self.first_room(left).or_else(|| self.first_room(right))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Room for a leaf: each side between 4 and two less than the leaf's, placed
/// at a random offset that keeps at least one wall cell inside the leaf on
/// every side.
pub(crate) fn candidate_room(region: Region, rng: &mut DungeonRng) -> Room {
    let max_width = region.width - 2;
    let max_height = region.height - 2;
    let width = rng.range(MIN_ROOM_SIZE.min(max_width), max_width);
    let height = rng.range(MIN_ROOM_SIZE.min(max_height), max_height);
    let x = region.x + rng.range(1, region.width - width - 1);
    let y = region.y + rng.range(1, region.height - height - 1);
    Room::new(x, y, width, height)
}

pub fn generate_spatial_partition(
    width: usize,
    height: usize,
    config: &PartitionConfig,
    rng: &mut DungeonRng,
) -> Dungeon {
    let mut dungeon = Dungeon::new(width, height);
    let mut tree = PartitionTree::build(width, height, config.min_leaf_size, rng);

    for leaf in tree.leaves() {
        let room = candidate_room(tree.region(leaf), rng);
        dungeon.carve_room(&room);
        dungeon.rooms.push(room);
        tree.set_room(leaf, room);
    }

    let links = tree.sibling_links();
    drop(tree);
    for (from, to) in &links {
        connect_rooms(&mut dungeon.grid, from, to, &config.corridor, rng);
    }
    let doors = place_doors(&mut dungeon.grid);

    debug!(
        algorithm = "spatial-partition",
        rooms = dungeon.rooms.len(),
        corridors = links.len(),
        doors,
        floor = dungeon.floor_count(),
        "partition dungeon generated"
    );
    dungeon
}
