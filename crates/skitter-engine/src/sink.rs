#![forbid(unsafe_code)]

//! The output seam toward rendering.
//!
//! The engine is headless: everything visual goes through [`VisualSink`],
//! which the host implements against its rendering layer. Within one
//! processed event, `set_translation` and `set_scale` are each called at
//! most once.

use crate::marker::MarkerId;
use skitter_core::geometry::{Point, Vec2};

/// Receiver for the engine's visual effects.
pub trait VisualSink {
    /// Apply a translation to the repelled element.
    fn set_translation(&mut self, offset: Vec2);

    /// Apply a uniform scale to the scaled element.
    fn set_scale(&mut self, scale: f64);

    /// A marker was spawned at a point.
    fn marker_spawned(&mut self, id: MarkerId, position: Point);

    /// A marker was removed.
    fn marker_removed(&mut self, id: MarkerId);

    /// Show or hide the trail indicator.
    fn set_indicator_visible(&mut self, visible: bool);

    /// Move the trail indicator.
    fn set_indicator_position(&mut self, position: Point);

    /// A press is in progress on the surface. Optional visual state; the
    /// default implementation ignores it.
    fn set_surface_engaged(&mut self, engaged: bool) {
        let _ = engaged;
    }
}

/// A sink that discards everything, for headless or bench use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl VisualSink for NullSink {
    fn set_translation(&mut self, _offset: Vec2) {}
    fn set_scale(&mut self, _scale: f64) {}
    fn marker_spawned(&mut self, _id: MarkerId, _position: Point) {}
    fn marker_removed(&mut self, _id: MarkerId) {}
    fn set_indicator_visible(&mut self, _visible: bool) {}
    fn set_indicator_position(&mut self, _position: Point) {}
}

/// One recorded sink call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkCall {
    Translation(Vec2),
    Scale(f64),
    MarkerSpawned(MarkerId, Point),
    MarkerRemoved(MarkerId),
    IndicatorVisible(bool),
    IndicatorPosition(Point),
    SurfaceEngaged(bool),
}

/// A sink that records every call in order, for tests and host-side
/// inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Ids of markers spawned so far, in call order.
    #[must_use]
    pub fn spawned_markers(&self) -> Vec<MarkerId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SinkCall::MarkerSpawned(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Ids of markers removed so far, in call order.
    #[must_use]
    pub fn removed_markers(&self) -> Vec<MarkerId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SinkCall::MarkerRemoved(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// The most recent translation applied, if any.
    #[must_use]
    pub fn last_translation(&self) -> Option<Vec2> {
        self.calls.iter().rev().find_map(|call| match call {
            SinkCall::Translation(offset) => Some(*offset),
            _ => None,
        })
    }

    /// The most recent scale applied, if any.
    #[must_use]
    pub fn last_scale(&self) -> Option<f64> {
        self.calls.iter().rev().find_map(|call| match call {
            SinkCall::Scale(scale) => Some(*scale),
            _ => None,
        })
    }
}

impl VisualSink for RecordingSink {
    fn set_translation(&mut self, offset: Vec2) {
        self.calls.push(SinkCall::Translation(offset));
    }

    fn set_scale(&mut self, scale: f64) {
        self.calls.push(SinkCall::Scale(scale));
    }

    fn marker_spawned(&mut self, id: MarkerId, position: Point) {
        self.calls.push(SinkCall::MarkerSpawned(id, position));
    }

    fn marker_removed(&mut self, id: MarkerId) {
        self.calls.push(SinkCall::MarkerRemoved(id));
    }

    fn set_indicator_visible(&mut self, visible: bool) {
        self.calls.push(SinkCall::IndicatorVisible(visible));
    }

    fn set_indicator_position(&mut self, position: Point) {
        self.calls.push(SinkCall::IndicatorPosition(position));
    }

    fn set_surface_engaged(&mut self, engaged: bool) {
        self.calls.push(SinkCall::SurfaceEngaged(engaged));
    }
}
