//! FTV encoding engine
//!
//! Synthesizes multi-series waveform data with controlled missing-value gaps,
//! packs it into the little-endian FTV wire layout, and caches encoded
//! payloads by request shape so repeated requests are served without
//! recomputation.
//!
//! # Architecture
//!
//! ```text
//!   RequestShape
//!        │
//!   ┌────▼─────┐   hit
//!   │  Cache   │──────────► Bytes
//!   └────┬─────┘
//!        │ miss
//!   ┌────▼─────┐
//!   │Synthesize│  ← clock + seeded gap phases
//!   └────┬─────┘
//!   ┌────▼─────┐
//!   │  Encode  │  → stored once, replayed forever
//!   └──────────┘
//! ```
//!
//! # Modules
//! - `shape`: request shape, decoded blocks, validation limits
//! - `synth`: timestamp/value synthesis and gap placement
//! - `codec`: FTV wire encoder and decoder
//! - `cache`: concurrent payload cache
//! - `errors`: error taxonomy

pub mod cache;
pub mod codec;
pub mod errors;
pub mod shape;
pub mod synth;

pub use cache::{CacheStats, PayloadCache};
pub use codec::{decode, encode};
pub use errors::{DecodeError, ShapeError};
pub use shape::{RequestShape, SeriesBlock, ShapeLimits, Synthesized};
pub use synth::{Clock, FixedClock, Synthesizer, SystemClock};

/// MIME type the FTV payload is served with.
pub const CONTENT_TYPE: &str = "application/octet-stream";

/// Spacing between consecutive timestamps, in milliseconds.
pub const TIMESTAMP_STEP_MS: i64 = 100;
