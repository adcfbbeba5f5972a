#![forbid(unsafe_code)]

//! Pointer-reactive behavior engine.
//!
//! This crate turns a stream of normalized pointer events into visual
//! transforms for two managed elements and a trail of spawned markers.
//!
//! # Key Components
//!
//! - [`SurfaceSession`] - the per-surface controller owning all mutable state
//! - [`RepulsionField`] / [`ScaleField`] - pure distance-driven transforms
//! - [`resolve`](collision::resolve) - axis-aligned overlap correction
//! - [`MarkerStore`] - spawned marker bookkeeping with region-scoped sweeps
//! - [`VisualSink`] - the opaque output seam toward rendering
//!
//! # Role in skitter
//! `skitter-engine` is the orchestrator. It consumes
//! `skitter_core::event::PointerEvent` values, runs the geometric behavior
//! pipeline (repulsion, collision correction, scaling), and reports results
//! through a caller-supplied [`VisualSink`]. Rendering and raw input capture
//! live outside.
//!
//! All computation is synchronous inside the handler for one event; the only
//! asynchronous boundary is the long-press deadline, modeled as explicit
//! state polled with an injected clock (see [`SurfaceSession::poll_long_press`]).

pub mod collision;
pub mod field;
pub mod marker;
pub mod session;
pub mod sink;

#[cfg(feature = "event-trace")]
pub mod trace;

pub use field::{RepulsionField, ScaleField};
pub use marker::{Marker, MarkerId, MarkerStore};
pub use session::{EngineConfig, LayoutError, SurfaceLayout, SurfaceSession};
pub use sink::{NullSink, RecordingSink, SinkCall, VisualSink};
