#![forbid(unsafe_code)]

//! Canonical pointer input types.
//!
//! The host captures raw mouse/touch input, translates it into surface-local
//! coordinates, and hands the engine a stream of [`PointerEvent`]s. Press
//! lifecycle events (`PressStart`/`PressEnd`/`PressCancel`) and `Click` are
//! distinct kinds: the host decides what constitutes a click, the engine only
//! reacts.
//!
//! Effect toggles arrive out of band relative to pointer events; they are
//! modeled as [`ElementId`] plus a boolean rather than as an event kind.

use crate::geometry::Point;
use bitflags::bitflags;

/// The kind of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerEventKind {
    /// Pointer entered the surface.
    Enter,

    /// Pointer moved inside the surface.
    Move,

    /// Pointer left the surface.
    Leave,

    /// A press (mouse button down / touch start) began.
    PressStart,

    /// The press ended normally.
    PressEnd,

    /// The press was cancelled by the platform.
    PressCancel,

    /// A completed click/tap.
    Click,
}

impl PointerEventKind {
    /// Whether this kind terminates the current hover/press session.
    #[must_use]
    pub const fn ends_session(self) -> bool {
        matches!(self, Self::Leave | Self::PressEnd | Self::PressCancel)
    }
}

/// A normalized pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pos: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, pos: Point) -> Self {
        Self { kind, pos }
    }

    /// Pointer entered the surface.
    #[must_use]
    pub const fn enter(pos: Point) -> Self {
        Self::new(PointerEventKind::Enter, pos)
    }

    /// Pointer moved.
    #[must_use]
    pub const fn moved(pos: Point) -> Self {
        Self::new(PointerEventKind::Move, pos)
    }

    /// Pointer left the surface.
    #[must_use]
    pub const fn leave(pos: Point) -> Self {
        Self::new(PointerEventKind::Leave, pos)
    }

    /// Press began.
    #[must_use]
    pub const fn press_start(pos: Point) -> Self {
        Self::new(PointerEventKind::PressStart, pos)
    }

    /// Press ended.
    #[must_use]
    pub const fn press_end(pos: Point) -> Self {
        Self::new(PointerEventKind::PressEnd, pos)
    }

    /// Press was cancelled.
    #[must_use]
    pub const fn press_cancel(pos: Point) -> Self {
        Self::new(PointerEventKind::PressCancel, pos)
    }

    /// Click/tap completed.
    #[must_use]
    pub const fn click(pos: Point) -> Self {
        Self::new(PointerEventKind::Click, pos)
    }
}

/// The two elements the engine manages, named by behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementId {
    /// The element displaced away from the pointer.
    Repelled,

    /// The element resized by pointer distance.
    Scaled,
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repelled => write!(f, "repelled"),
            Self::Scaled => write!(f, "scaled"),
        }
    }
}

bitflags! {
    /// Which per-element effects are currently enabled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EffectFlags: u8 {
        /// No effects.
        const NONE  = 0b00;
        /// Repulsion displacement for the repelled element.
        const REPEL = 0b01;
        /// Distance-based scaling for the scaled element.
        const SCALE = 0b10;
    }
}

impl EffectFlags {
    /// The flag controlling a given element.
    #[must_use]
    pub const fn for_element(element: ElementId) -> EffectFlags {
        match element {
            ElementId::Repelled => EffectFlags::REPEL,
            ElementId::Scaled => EffectFlags::SCALE,
        }
    }
}

impl Default for EffectFlags {
    /// Both effects start enabled.
    fn default() -> Self {
        Self::all()
    }
}
