#![forbid(unsafe_code)]

//! Core: geometric primitives and canonical pointer event types.
//!
//! # Role in skitter
//! `skitter-core` is the input layer. It owns the shared geometry vocabulary
//! (points, displacement vectors, axis-aligned boxes) and the normalized
//! pointer event types that the engine consumes.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`/`Vec2`/`Rect` with closed-interval overlap and
//!   per-axis penetration depth.
//! - **Event**: canonical pointer events (enter, move, leave, press
//!   lifecycle, click) and the per-element effect toggles.
//!
//! # How it fits in the system
//! The engine (`skitter-engine`) consumes `skitter_core::event` values and
//! drives element transforms. Rendering is out of scope on both sides: the
//! host translates raw input into these events, and the engine reports
//! results through its visual sink.

pub mod event;
pub mod geometry;
