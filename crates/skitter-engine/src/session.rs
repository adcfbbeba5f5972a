#![forbid(unsafe_code)]

//! Per-surface session controller.
//!
//! [`SurfaceSession`] owns every piece of mutable interaction state: the two
//! element transforms, the effect toggles, the marker store, and the pending
//! long-press deadline. It is constructed once from the initial layout plus
//! tuning, and from then on consumes normalized pointer events.
//!
//! # State Machine
//!
//! - **Idle → Hovering** on enter: trail indicator shown.
//! - **Hovering** on move: both fields recomputed (each gated by its own
//!   effect flag), repulsion corrected against the scaled element's current
//!   box, indicator position updated.
//! - **→ Idle** on leave / press-end / press-cancel: enabled elements reset,
//!   indicator hidden, pending long-press cancelled.
//! - **Press**: press-start spawns a marker immediately and arms the
//!   long-press deadline; if the press survives to the deadline, a second
//!   marker is spawned at the *original* press point.
//!
//! # Invariants
//!
//! 1. Initial element boxes are captured at construction and never mutated.
//! 2. Exactly one transform value is live per element; last write wins.
//! 3. At most one long-press deadline is outstanding; a new press cancels
//!    and replaces any prior one, and cancellation is idempotent.
//! 4. Per processed event, `set_translation` and `set_scale` are each
//!    emitted at most once.
//! 5. Resetting an element already at rest is a no-op (no sink traffic, no
//!    marker sweep), which makes the disable-effect reset idempotent.
//!
//! # Failure Modes
//!
//! - A long-press deadline polled after its press ended is a no-op: ending
//!   the press clears the pending state before the poll can observe it.
//! - Events are trusted to arrive in order from a single host context; the
//!   session never blocks or defers work across events.

use crate::collision::resolve;
use crate::field::{RepulsionConfig, RepulsionField, ScaleConfig, ScaleField};
use crate::marker::MarkerStore;
use crate::sink::VisualSink;
use rand::Rng;
use skitter_core::event::{EffectFlags, ElementId, PointerEvent, PointerEventKind};
use skitter_core::geometry::{Point, Rect, Vec2};
use tracing::{debug, trace, warn};
use web_time::{Duration, Instant};

/// Upper bound on random placement attempts in
/// [`SurfaceSession::scatter_repelled`] before giving up on a crowded
/// surface.
const MAX_SCATTER_ATTEMPTS: usize = 32;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning for a whole session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Repulsion field tuning for the repelled element.
    pub repulsion: RepulsionConfig,
    /// Scale field tuning for the scaled element.
    pub scale: ScaleConfig,
    /// How long a press must be held before the long-press marker spawns
    /// (default: 500ms).
    pub long_press_delay: Duration,
    /// Optional marker cap; `None` (the default) grows without bound.
    pub marker_capacity: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            repulsion: RepulsionConfig::default(),
            scale: ScaleConfig::default(),
            long_press_delay: Duration::from_millis(500),
            marker_capacity: None,
        }
    }
}

impl EngineConfig {
    /// Set the repulsion tuning (builder pattern).
    #[must_use]
    pub fn with_repulsion(mut self, repulsion: RepulsionConfig) -> Self {
        self.repulsion = repulsion;
        self
    }

    /// Set the scale tuning (builder pattern).
    #[must_use]
    pub fn with_scale(mut self, scale: ScaleConfig) -> Self {
        self.scale = scale;
        self
    }

    /// Set the long-press delay (builder pattern).
    #[must_use]
    pub fn with_long_press_delay(mut self, delay: Duration) -> Self {
        self.long_press_delay = delay;
        self
    }

    /// Cap the marker store (builder pattern).
    #[must_use]
    pub fn with_marker_capacity(mut self, capacity: usize) -> Self {
        self.marker_capacity = Some(capacity);
        self
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// The initial geometry handed in by the host: the surface box and the two
/// element boxes, all in one shared coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub surface: Rect,
    pub repelled: Rect,
    pub scaled: Rect,
}

impl SurfaceLayout {
    /// Create a layout.
    #[must_use]
    pub const fn new(surface: Rect, repelled: Rect, scaled: Rect) -> Self {
        Self {
            surface,
            repelled,
            scaled,
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.surface.is_empty() {
            return Err(LayoutError::EmptySurface);
        }
        for (id, rect) in [
            (ElementId::Repelled, &self.repelled),
            (ElementId::Scaled, &self.scaled),
        ] {
            if rect.is_empty() {
                return Err(LayoutError::EmptyElement(id));
            }
            if !self.surface.contains_rect(rect) {
                return Err(LayoutError::ElementOutsideSurface(id));
            }
        }
        Ok(())
    }
}

/// Rejected layout at session construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The surface box has no area.
    EmptySurface,
    /// An element box has no area.
    EmptyElement(ElementId),
    /// An element box is not fully inside the surface.
    ElementOutsideSurface(ElementId),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySurface => write!(f, "surface box has no area"),
            Self::EmptyElement(id) => write!(f, "{id} element box has no area"),
            Self::ElementOutsideSurface(id) => {
                write!(f, "{id} element box lies outside the surface")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Hovering,
}

/// The single outstanding long-press deadline, keyed by press sequence.
#[derive(Debug, Clone, Copy)]
struct PendingLongPress {
    deadline: Instant,
    origin: Point,
    seq: u64,
}

// ---------------------------------------------------------------------------
// SurfaceSession
// ---------------------------------------------------------------------------

/// The per-surface interaction controller.
///
/// Feed it pointer events with [`handle_event`](Self::handle_event), toggle
/// changes with [`set_effect_enabled`](Self::set_effect_enabled), and poll
/// the long-press deadline from the host's timer source with
/// [`poll_long_press`](Self::poll_long_press). Time is always injected; the
/// session never samples a clock itself.
#[derive(Debug)]
pub struct SurfaceSession {
    config: EngineConfig,
    layout: SurfaceLayout,
    repulsion: RepulsionField,
    scale_field: ScaleField,
    effects: EffectFlags,
    translation: Vec2,
    scale: f64,
    markers: MarkerStore,
    phase: Phase,
    pending_press: Option<PendingLongPress>,
    press_seq: u64,
}

impl SurfaceSession {
    /// Create a session over a validated layout.
    pub fn new(layout: SurfaceLayout, config: EngineConfig) -> Result<Self, LayoutError> {
        layout.validate()?;
        let markers = match config.marker_capacity {
            Some(capacity) => MarkerStore::with_capacity_limit(capacity),
            None => MarkerStore::new(),
        };
        Ok(Self {
            repulsion: RepulsionField::new(config.repulsion),
            scale_field: ScaleField::new(config.scale),
            effects: EffectFlags::default(),
            translation: Vec2::ZERO,
            scale: 1.0,
            markers,
            phase: Phase::Idle,
            pending_press: None,
            press_seq: 0,
            config,
            layout,
        })
    }

    /// Process one pointer event.
    pub fn handle_event(&mut self, event: &PointerEvent, now: Instant, sink: &mut dyn VisualSink) {
        trace!(kind = ?event.kind, x = event.pos.x, y = event.pos.y, "pointer event");
        match event.kind {
            PointerEventKind::Enter => {
                self.phase = Phase::Hovering;
                sink.set_indicator_visible(true);
            }
            PointerEventKind::Move => {
                self.phase = Phase::Hovering;
                self.update_fields(event.pos, sink);
                sink.set_indicator_position(event.pos);
            }
            PointerEventKind::Leave => {
                self.end_session(sink);
            }
            PointerEventKind::PressStart => {
                self.phase = Phase::Hovering;
                sink.set_indicator_visible(true);
                sink.set_surface_engaged(true);
                self.spawn_marker(event.pos, sink);
                self.arm_long_press(event.pos, now);
            }
            PointerEventKind::PressEnd | PointerEventKind::PressCancel => {
                sink.set_surface_engaged(false);
                self.end_session(sink);
            }
            PointerEventKind::Click => {
                self.spawn_marker(event.pos, sink);
            }
        }
    }

    /// Check the long-press deadline. Call from the host's timer/tick source.
    ///
    /// Returns `true` when the deadline fired, in which case a second marker
    /// was spawned at the original press point. Polling with no pending
    /// press, or before the deadline, is a no-op.
    pub fn poll_long_press(&mut self, now: Instant, sink: &mut dyn VisualSink) -> bool {
        match self.pending_press {
            Some(pending) if now >= pending.deadline => {
                self.pending_press = None;
                debug!(seq = pending.seq, "long-press fired");
                self.spawn_marker(pending.origin, sink);
                true
            }
            _ => false,
        }
    }

    /// Toggle one element's effect. Disabling resets that element
    /// immediately; enabling takes hold from the next move.
    pub fn set_effect_enabled(
        &mut self,
        element: ElementId,
        enabled: bool,
        sink: &mut dyn VisualSink,
    ) {
        let flag = EffectFlags::for_element(element);
        if enabled {
            self.effects.insert(flag);
            return;
        }
        self.effects.remove(flag);
        match element {
            ElementId::Repelled => self.reset_repelled(sink),
            ElementId::Scaled => self.reset_scaled(sink),
        }
    }

    /// Move the repelled element to a random spot in the surface's upper
    /// half that does not overlap the scaled element's current box.
    ///
    /// Placement is rejection-sampled with a bounded number of attempts; returns
    /// `false` (leaving the transform untouched) when no free spot was found.
    pub fn scatter_repelled<R: Rng>(&mut self, rng: &mut R, sink: &mut dyn VisualSink) -> bool {
        let surface = self.layout.surface;
        let initial = self.layout.repelled;
        let obstacle = self.scaled_box();

        let max_x = (surface.width - initial.width).max(0.0);
        let max_y = (surface.height / 2.0 - initial.height).max(0.0);

        for _ in 0..MAX_SCATTER_ATTEMPTS {
            let left = surface.left + rng.random_range(0.0..=max_x);
            let top = surface.top + rng.random_range(0.0..=max_y);
            let candidate = Rect::new(left, top, initial.width, initial.height);
            if candidate.overlaps(&obstacle) {
                continue;
            }
            let translation = Vec2::new(left - initial.left, top - initial.top);
            self.translation = translation;
            sink.set_translation(translation);
            return true;
        }
        warn!(attempts = MAX_SCATTER_ATTEMPTS, "scatter found no free spot");
        false
    }

    // -- accessors ----------------------------------------------------------

    /// The layout captured at construction.
    #[must_use]
    pub const fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// The tuning captured at construction.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current translation of the repelled element.
    #[must_use]
    pub const fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Current scale factor of the scaled element.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// The repelled element's current (displaced) box.
    #[must_use]
    pub fn repelled_box(&self) -> Rect {
        self.layout.repelled.translated(self.translation)
    }

    /// The scaled element's current (mid-scale) box.
    #[must_use]
    pub fn scaled_box(&self) -> Rect {
        self.layout.scaled.scaled_about_center(self.scale)
    }

    /// Live markers.
    #[must_use]
    pub const fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    /// Whether the pointer is currently inside the surface.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.phase == Phase::Hovering
    }

    /// Whether a long-press deadline is outstanding.
    #[must_use]
    pub const fn has_pending_long_press(&self) -> bool {
        self.pending_press.is_some()
    }

    /// Whether an element's effect is enabled.
    #[must_use]
    pub fn effect_enabled(&self, element: ElementId) -> bool {
        self.effects.contains(EffectFlags::for_element(element))
    }

    // -- internals ----------------------------------------------------------

    fn update_fields(&mut self, pointer: Point, sink: &mut dyn VisualSink) {
        // Snapshot the geometry, compute purely, then apply: one transform
        // write per element per event.
        let repelled_initial = self.layout.repelled;
        let scaled_initial = self.layout.scaled;

        if self.effects.contains(EffectFlags::REPEL) {
            let proposed = self.repulsion.displacement(pointer, &repelled_initial);
            // The obstacle box is read fresh: the scaled element may be
            // mid-scale from the previous event.
            let obstacle = scaled_initial.scaled_about_center(self.scale);
            let corrected = resolve(proposed, &repelled_initial, &obstacle);
            self.translation = corrected;
            sink.set_translation(corrected);
        }

        if self.effects.contains(EffectFlags::SCALE) {
            let scale = self.scale_field.scale_for(pointer, &scaled_initial);
            self.scale = scale;
            sink.set_scale(scale);
        }
    }

    fn spawn_marker(&mut self, position: Point, sink: &mut dyn VisualSink) {
        let spawned = self.markers.spawn(position);
        if let Some(evicted) = spawned.evicted {
            debug!(%evicted, "marker evicted at capacity");
            sink.marker_removed(evicted);
        }
        sink.marker_spawned(spawned.id, position);
    }

    fn arm_long_press(&mut self, origin: Point, now: Instant) {
        if let Some(stale) = self.pending_press.take() {
            debug!(seq = stale.seq, "replacing pending long-press");
        }
        self.press_seq += 1;
        self.pending_press = Some(PendingLongPress {
            deadline: now + self.config.long_press_delay,
            origin,
            seq: self.press_seq,
        });
        trace!(seq = self.press_seq, "armed long-press");
    }

    fn cancel_long_press(&mut self) {
        // Idempotent: cancelling a fired or already-cancelled press is a no-op.
        self.pending_press = None;
    }

    fn end_session(&mut self, sink: &mut dyn VisualSink) {
        if self.effects.contains(EffectFlags::REPEL) {
            self.reset_repelled(sink);
        }
        if self.effects.contains(EffectFlags::SCALE) {
            self.reset_scaled(sink);
        }
        sink.set_indicator_visible(false);
        self.cancel_long_press();
        self.phase = Phase::Idle;
    }

    /// Return the repelled element to rest. Sweeps markers inside the
    /// *displaced* bounds first, so only markers sitting on the pushed box
    /// are cleared as it returns. No-op at rest.
    fn reset_repelled(&mut self, sink: &mut dyn VisualSink) {
        if self.translation == Vec2::ZERO {
            return;
        }
        let displaced = self.repelled_box();
        let removed = self.markers.clear_within(&displaced);
        if !removed.is_empty() {
            debug!(count = removed.len(), "swept markers under repelled element");
        }
        for id in removed {
            sink.marker_removed(id);
        }
        self.translation = Vec2::ZERO;
        sink.set_translation(Vec2::ZERO);
    }

    /// Return the scaled element to rest. No-op at rest.
    fn reset_scaled(&mut self, sink: &mut dyn VisualSink) {
        if self.scale == 1.0 {
            return;
        }
        self.scale = 1.0;
        sink.set_scale(1.0);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkCall};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layout() -> SurfaceLayout {
        SurfaceLayout::new(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Rect::new(100.0, 100.0, 100.0, 100.0), // center (150, 150)
            Rect::new(500.0, 100.0, 100.0, 100.0), // center (550, 150)
        )
    }

    fn session() -> SurfaceSession {
        SurfaceSession::new(layout(), EngineConfig::default()).unwrap()
    }

    fn now() -> Instant {
        Instant::now()
    }

    const MS_300: Duration = Duration::from_millis(300);
    const MS_500: Duration = Duration::from_millis(500);
    const MS_1000: Duration = Duration::from_millis(1000);

    #[test]
    fn starts_at_rest() {
        let s = session();
        assert_eq!(s.translation(), Vec2::ZERO);
        assert_eq!(s.scale(), 1.0);
        assert!(!s.is_hovering());
        assert!(!s.has_pending_long_press());
        assert!(s.markers().is_empty());
        assert!(s.effect_enabled(ElementId::Repelled));
        assert!(s.effect_enabled(ElementId::Scaled));
    }

    #[test]
    fn rejects_empty_surface() {
        let bad = SurfaceLayout::new(
            Rect::new(0.0, 0.0, 0.0, 600.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 0.0, 10.0, 10.0),
        );
        assert_eq!(
            SurfaceSession::new(bad, EngineConfig::default()).err(),
            Some(LayoutError::EmptySurface)
        );
    }

    #[test]
    fn rejects_empty_element() {
        let bad = SurfaceLayout::new(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Rect::new(100.0, 100.0, 0.0, 100.0),
            Rect::new(500.0, 100.0, 100.0, 100.0),
        );
        assert_eq!(
            SurfaceSession::new(bad, EngineConfig::default()).err(),
            Some(LayoutError::EmptyElement(ElementId::Repelled))
        );
    }

    #[test]
    fn rejects_element_outside_surface() {
        let bad = SurfaceLayout::new(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Rect::new(100.0, 100.0, 100.0, 100.0),
            Rect::new(750.0, 100.0, 100.0, 100.0),
        );
        assert_eq!(
            SurfaceSession::new(bad, EngineConfig::default()).err(),
            Some(LayoutError::ElementOutsideSurface(ElementId::Scaled))
        );
    }

    #[test]
    fn enter_shows_indicator_and_hovers() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.handle_event(&PointerEvent::enter(Point::new(10.0, 10.0)), now(), &mut sink);
        assert!(s.is_hovering());
        assert_eq!(sink.calls, vec![SinkCall::IndicatorVisible(true)]);
    }

    #[test]
    fn move_emits_each_transform_at_most_once() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.handle_event(&PointerEvent::moved(Point::new(200.0, 200.0)), now(), &mut sink);

        let translations = sink
            .calls
            .iter()
            .filter(|c| matches!(c, SinkCall::Translation(_)))
            .count();
        let scales = sink
            .calls
            .iter()
            .filter(|c| matches!(c, SinkCall::Scale(_)))
            .count();
        assert_eq!(translations, 1);
        assert_eq!(scales, 1);
        assert_eq!(
            sink.calls.last(),
            Some(&SinkCall::IndicatorPosition(Point::new(200.0, 200.0)))
        );
    }

    #[test]
    fn move_with_effects_disabled_only_moves_indicator() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.set_effect_enabled(ElementId::Repelled, false, &mut sink);
        s.set_effect_enabled(ElementId::Scaled, false, &mut sink);
        sink.clear();

        s.handle_event(&PointerEvent::moved(Point::new(200.0, 200.0)), now(), &mut sink);
        assert_eq!(
            sink.calls,
            vec![SinkCall::IndicatorPosition(Point::new(200.0, 200.0))]
        );
    }

    #[test]
    fn repulsion_is_corrected_against_scaled_element() {
        // Obstacle directly to the right of the repelled element, and a
        // gentle push so the proposed box lands inside it.
        let layout = SurfaceLayout::new(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            Rect::new(100.0, 100.0, 100.0, 100.0), // center (150, 150)
            Rect::new(220.0, 100.0, 100.0, 100.0), // center (270, 150)
        );
        let config = EngineConfig::default().with_repulsion(RepulsionConfig {
            activation_radius: 180.0,
            max_push: 180.0,
        });
        let mut s = SurfaceSession::new(layout, config).unwrap();
        let mut sink = RecordingSink::new();
        // Hold the obstacle at rest scale so the correction is exact.
        s.set_effect_enabled(ElementId::Scaled, false, &mut sink);

        // Pointer 90 left of the repelled center: intensity 0.5, proposed
        // push +90 in x, overlapping the obstacle 70 deep. The resolver
        // backs it off to +20, leaving edge contact.
        s.handle_event(&PointerEvent::moved(Point::new(60.0, 150.0)), now(), &mut sink);
        let t = s.translation();
        assert!((t.x - 20.0).abs() < 1e-9);
        assert!(t.y.abs() < 1e-9);
        assert!(!s.repelled_box().penetration(&s.scaled_box()).is_overlap());
    }

    #[test]
    fn click_spawns_marker() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.handle_event(&PointerEvent::click(Point::new(42.0, 24.0)), now(), &mut sink);
        assert_eq!(s.markers().len(), 1);
        assert_eq!(sink.spawned_markers().len(), 1);
    }

    #[test]
    fn press_spawns_immediately_and_again_on_long_press() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        let t0 = now();
        let origin = Point::new(300.0, 300.0);

        s.handle_event(&PointerEvent::press_start(origin), t0, &mut sink);
        assert_eq!(s.markers().len(), 1);
        assert!(s.has_pending_long_press());

        // Just before the deadline: nothing.
        assert!(!s.poll_long_press(t0 + Duration::from_millis(499), &mut sink));
        assert_eq!(s.markers().len(), 1);

        // At the deadline: a second marker at the original press point.
        assert!(s.poll_long_press(t0 + MS_500, &mut sink));
        assert_eq!(s.markers().len(), 2);
        let positions: Vec<Point> = s.markers().iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![origin, origin]);

        // Deadline is disarmed after firing.
        assert!(!s.poll_long_press(t0 + MS_1000, &mut sink));
        assert_eq!(s.markers().len(), 2);
    }

    #[test]
    fn releasing_early_cancels_long_press() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        let t0 = now();
        let p = Point::new(300.0, 300.0);

        s.handle_event(&PointerEvent::press_start(p), t0, &mut sink);
        s.handle_event(&PointerEvent::press_end(p), t0 + MS_300, &mut sink);
        assert!(!s.has_pending_long_press());

        assert!(!s.poll_long_press(t0 + MS_1000, &mut sink));
        assert_eq!(s.markers().len(), 1);
        assert_eq!(sink.spawned_markers().len(), 1);
    }

    #[test]
    fn new_press_replaces_pending_long_press() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        let t0 = now();
        let first = Point::new(100.0, 300.0);
        let second = Point::new(400.0, 300.0);

        s.handle_event(&PointerEvent::press_start(first), t0, &mut sink);
        s.handle_event(
            &PointerEvent::press_start(second),
            t0 + Duration::from_millis(200),
            &mut sink,
        );

        // The first press's deadline (t0+500) must not fire; only the
        // second one (t0+700) does, at the second press point.
        assert!(!s.poll_long_press(t0 + Duration::from_millis(600), &mut sink));
        assert!(s.poll_long_press(t0 + Duration::from_millis(700), &mut sink));
        assert_eq!(s.markers().len(), 3);
        let last = s.markers().iter().last().unwrap();
        assert_eq!(last.position, second);
    }

    #[test]
    fn leave_resets_and_sweeps_displaced_bounds() {
        let mut s = session();
        let mut sink = RecordingSink::new();

        // Push the repelled element right: pointer at (50, 150) is 100 from
        // its center, proposing (+390, 0) with the default tuning; the
        // resolver backs that off the scaled element to (+300, 0), leaving
        // the displaced box at (400..500, 100..200).
        s.handle_event(&PointerEvent::moved(Point::new(50.0, 150.0)), now(), &mut sink);
        assert!((s.translation().x - 300.0).abs() < 1e-9);

        let inside = PointerEvent::click(Point::new(450.0, 150.0));
        let outside = PointerEvent::click(Point::new(10.0, 10.0));
        s.handle_event(&inside, now(), &mut sink);
        s.handle_event(&outside, now(), &mut sink);
        assert_eq!(s.markers().len(), 2);
        sink.clear();

        s.handle_event(&PointerEvent::leave(Point::new(-1.0, -1.0)), now(), &mut sink);
        assert_eq!(s.translation(), Vec2::ZERO);
        assert_eq!(s.scale(), 1.0);
        assert!(!s.is_hovering());
        assert_eq!(s.markers().len(), 1);
        assert_eq!(sink.removed_markers().len(), 1);
        assert_eq!(sink.last_translation(), Some(Vec2::ZERO));
        assert!(sink.calls.contains(&SinkCall::IndicatorVisible(false)));
    }

    #[test]
    fn disable_reset_is_idempotent() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.handle_event(&PointerEvent::moved(Point::new(50.0, 150.0)), now(), &mut sink);
        assert!(s.translation() != Vec2::ZERO);

        s.set_effect_enabled(ElementId::Repelled, false, &mut sink);
        let markers_after_first = s.markers().len();
        assert_eq!(s.translation(), Vec2::ZERO);
        sink.clear();

        // Second disable: identical state, zero sink traffic.
        s.set_effect_enabled(ElementId::Repelled, false, &mut sink);
        assert!(sink.calls.is_empty());
        assert_eq!(s.translation(), Vec2::ZERO);
        assert_eq!(s.markers().len(), markers_after_first);
    }

    #[test]
    fn disabling_scale_resets_to_one() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.handle_event(&PointerEvent::moved(Point::new(50.0, 150.0)), now(), &mut sink);
        assert!(s.scale() != 1.0);
        sink.clear();

        s.set_effect_enabled(ElementId::Scaled, false, &mut sink);
        assert_eq!(s.scale(), 1.0);
        assert_eq!(sink.calls, vec![SinkCall::Scale(1.0)]);

        sink.clear();
        s.set_effect_enabled(ElementId::Scaled, false, &mut sink);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn reenabled_effect_takes_hold_on_next_move() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        s.set_effect_enabled(ElementId::Scaled, false, &mut sink);
        s.handle_event(&PointerEvent::moved(Point::new(50.0, 150.0)), now(), &mut sink);
        assert_eq!(s.scale(), 1.0);

        s.set_effect_enabled(ElementId::Scaled, true, &mut sink);
        s.handle_event(&PointerEvent::moved(Point::new(50.0, 150.0)), now(), &mut sink);
        assert!(s.scale() != 1.0);
    }

    #[test]
    fn press_engages_surface_and_release_disengages() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        let p = Point::new(300.0, 300.0);
        s.handle_event(&PointerEvent::press_start(p), now(), &mut sink);
        assert!(sink.calls.contains(&SinkCall::SurfaceEngaged(true)));

        sink.clear();
        s.handle_event(&PointerEvent::press_cancel(p), now(), &mut sink);
        assert_eq!(sink.calls.first(), Some(&SinkCall::SurfaceEngaged(false)));
        assert!(!s.has_pending_long_press());
    }

    #[test]
    fn marker_capacity_evicts_through_the_sink() {
        let mut s = SurfaceSession::new(
            layout(),
            EngineConfig::default().with_marker_capacity(2),
        )
        .unwrap();
        let mut sink = RecordingSink::new();

        for i in 0..3 {
            let p = Point::new(10.0 * f64::from(i), 10.0);
            s.handle_event(&PointerEvent::click(p), now(), &mut sink);
        }
        assert_eq!(s.markers().len(), 2);
        assert_eq!(sink.removed_markers().len(), 1);
        assert_eq!(sink.removed_markers()[0], sink.spawned_markers()[0]);
    }

    #[test]
    fn scatter_lands_in_upper_half_clear_of_obstacle() {
        let mut s = session();
        let mut sink = RecordingSink::new();
        let mut rng = StdRng::seed_from_u64(42);

        assert!(s.scatter_repelled(&mut rng, &mut sink));
        let landed = s.repelled_box();
        let surface = s.layout().surface;
        assert!(surface.contains_rect(&landed));
        assert!(landed.bottom() <= surface.top + surface.height / 2.0 + 1e-9);
        assert!(!landed.overlaps(&s.scaled_box()));
        assert_eq!(sink.last_translation(), Some(s.translation()));
    }
}
