#![forbid(unsafe_code)]

//! Pointer event trace recording and replay.
//!
//! Records the normalized input stream (pointer events and effect toggles)
//! as JSONL with monotonic millisecond offsets, so a session can be replayed
//! deterministically against [`SurfaceSession`](crate::session::SurfaceSession)
//! for debugging.
//!
//! # Format
//!
//! One JSON object per line, tagged by `record`. The first line is always a
//! `header` carrying the schema version and session name.
//!
//! The trace origin is injected at construction; offsets are computed
//! against it, never against a sampled wall clock.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use skitter_core::event::{ElementId, PointerEvent, PointerEventKind};
use web_time::Instant;

/// Current schema version for trace files.
pub const SCHEMA_VERSION: &str = "pointer-trace-v1";

/// A single record in a trace file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record")]
pub enum TraceRecord {
    /// Header record (first line).
    #[serde(rename = "header")]
    Header {
        schema_version: String,
        session_name: String,
    },

    /// A pointer event.
    #[serde(rename = "pointer")]
    Pointer {
        ts_ms: u64,
        kind: PointerEventKind,
        x: f64,
        y: f64,
    },

    /// An effect toggle change.
    #[serde(rename = "toggle")]
    Toggle {
        ts_ms: u64,
        element: ElementId,
        enabled: bool,
    },
}

/// Streams trace records to a writer as JSONL.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    out: W,
    origin: Instant,
}

impl<W: Write> TraceWriter<W> {
    /// Start a trace, writing the header line immediately. `origin` anchors
    /// all subsequent timestamp offsets.
    pub fn new(mut out: W, session_name: &str, origin: Instant) -> io::Result<Self> {
        let header = TraceRecord::Header {
            schema_version: SCHEMA_VERSION.to_string(),
            session_name: session_name.to_string(),
        };
        write_line(&mut out, &header)?;
        Ok(Self { out, origin })
    }

    fn offset_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.origin).as_millis() as u64
    }

    /// Record a pointer event.
    pub fn record_event(&mut self, event: &PointerEvent, now: Instant) -> io::Result<()> {
        let record = TraceRecord::Pointer {
            ts_ms: self.offset_ms(now),
            kind: event.kind,
            x: event.pos.x,
            y: event.pos.y,
        };
        write_line(&mut self.out, &record)
    }

    /// Record an effect toggle change.
    pub fn record_toggle(
        &mut self,
        element: ElementId,
        enabled: bool,
        now: Instant,
    ) -> io::Result<()> {
        let record = TraceRecord::Toggle {
            ts_ms: self.offset_ms(now),
            element,
            enabled,
        };
        write_line(&mut self.out, &record)
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

fn write_line<W: Write>(out: &mut W, record: &TraceRecord) -> io::Result<()> {
    let json = serde_json::to_string(record)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")
}

/// Read every record from a trace. Blank lines are skipped; a malformed line
/// is an `InvalidData` error.
pub fn read_trace<R: BufRead>(reader: R) -> io::Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        records.push(record);
    }
    Ok(records)
}
