#![forbid(unsafe_code)]

//! Trail marker bookkeeping.
//!
//! Markers are spawned at press/click points and live until a reset sweep
//! removes them. The store is the single owner: once an id has been removed
//! it is gone from every accessor, so callers never observe dangling entries.
//!
//! Growth is unbounded by default, an accepted characteristic of the
//! original interaction, not a fault. Hosts embedding the engine elsewhere
//! can opt into a capacity limit; at the limit the lowest (oldest) id is
//! evicted to make room and reported to the caller so the visual side can be
//! told.

use skitter_core::geometry::{Point, Rect};
use std::collections::BTreeMap;

/// Identifier for a spawned marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u32);

impl MarkerId {
    /// Raw id value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// A tracked marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: Point,
}

/// Result of a spawn: the new marker's id, plus the id evicted to make room
/// when a capacity limit is configured and full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub id: MarkerId,
    pub evicted: Option<MarkerId>,
}

/// Owner of all live markers.
#[derive(Debug, Clone, Default)]
pub struct MarkerStore {
    next_id: u32,
    capacity: Option<usize>,
    markers: BTreeMap<u32, Point>,
}

impl MarkerStore {
    /// Create an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            capacity: None,
            markers: BTreeMap::new(),
        }
    }

    /// Create a store that holds at most `capacity` markers, evicting the
    /// oldest on overflow. A zero capacity is normalized to one.
    #[must_use]
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            next_id: 1,
            capacity: Some(capacity.max(1)),
            markers: BTreeMap::new(),
        }
    }

    fn next_free_id(&mut self) -> u32 {
        loop {
            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1).max(1);
            if !self.markers.contains_key(&id) {
                return id;
            }
        }
    }

    /// Spawn a marker at a point.
    pub fn spawn(&mut self, position: Point) -> Spawned {
        let evicted = match self.capacity {
            Some(cap) if self.markers.len() >= cap => {
                self.markers.pop_first().map(|(id, _)| MarkerId(id))
            }
            _ => None,
        };
        let id = self.next_free_id();
        self.markers.insert(id, position);
        Spawned {
            id: MarkerId(id),
            evicted,
        }
    }

    /// Remove every marker whose position lies within `region` (edges count
    /// as inside) and return their ids. Markers outside are retained.
    pub fn clear_within(&mut self, region: &Rect) -> Vec<MarkerId> {
        let removed: Vec<u32> = self
            .markers
            .iter()
            .filter(|(_, position)| region.contains(**position))
            .map(|(id, _)| *id)
            .collect();
        for id in &removed {
            self.markers.remove(id);
        }
        removed.into_iter().map(MarkerId).collect()
    }

    /// Remove every marker and return their ids.
    pub fn clear_all(&mut self) -> Vec<MarkerId> {
        let removed: Vec<MarkerId> = self.markers.keys().copied().map(MarkerId).collect();
        self.markers.clear();
        removed
    }

    /// Number of live markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no markers are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Whether a marker is still live.
    #[must_use]
    pub fn contains(&self, id: MarkerId) -> bool {
        self.markers.contains_key(&id.0)
    }

    /// Position of a live marker.
    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<Point> {
        self.markers.get(&id.0).copied()
    }

    /// Iterate over live markers in id order.
    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        self.markers.iter().map(|(id, position)| Marker {
            id: MarkerId(*id),
            position: *position,
        })
    }
}
