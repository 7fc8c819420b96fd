//! This library is the foundation for the `rg16-in` crate. It can be built
//! either with serialization support, or in a slightly more lightweight
//! manner without it (see features).
#![allow(clippy::derive_partial_eq_without_eq)]
extern crate num;
#[macro_use]
extern crate num_derive;

#[cfg(any(feature = "to_json", feature = "serde"))]
extern crate serde;
#[cfg(feature = "to_json")]
extern crate serde_json;

pub mod enums;
pub mod errors;
pub mod field_reader;
pub mod headers;
pub mod options;
pub mod trace_header;
#[cfg(test)]
mod tests;

pub use enums::*;
pub use errors::Rg16Error;
pub use field_reader::{ByteSource, Encoding, FieldWidth};
pub use headers::*;
pub use options::ReadOptions;
pub use trace_header::*;

/// Length in bytes of the fixed 20-byte trace header that opens every
/// trace block.
pub const TRACE_PREAMBLE_LEN: usize = 20;
/// Length in bytes of every extension block, whether a channel-set
/// descriptor, an extended header, or a trace extension block.
pub const BLOCK_LEN: usize = 32;
/// Highest valid trace extension block index.
pub const MAX_TRACE_EXTENSION_BLOCKS: u8 = 10;

/// A point in time expressed as seconds since the Unix epoch (UTC). Kept as
/// a thin wrapper rather than a bare `f64` so that callers can't confuse a
/// timestamp with an arbitrary duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtcDateTime(f64);

impl UtcDateTime {
    /// A sentinel used as the default `endtime` so that `read_rg16` with
    /// default options is deterministic rather than depending on the local
    /// wall clock.
    pub const INFINITY: UtcDateTime = UtcDateTime(f64::INFINITY);

    pub fn from_posix_seconds(seconds: f64) -> Self {
        UtcDateTime(seconds)
    }

    pub fn timestamp(&self) -> f64 {
        self.0
    }
}

/// A single decoded trace: its samples (empty under `headonly`) and the
/// metadata read from its preamble, and optionally its full header detail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    pub network: String,
    pub station: String,
    pub location: String,
    /// SEED-style band+instrument+component code, e.g. `"GPZ"`.
    pub channel: String,
    pub starttime: UtcDateTime,
    pub endtime: UtcDateTime,
    pub sampling_rate: u32,
    pub npts: u64,
    pub samples: Vec<f32>,
    /// Populated only when `ReadOptions::details` is set.
    pub details: Option<TraceDetails>,
}

impl Trace {
    /// A stable identifier in the SEED `network.station.location.channel`
    /// convention, used to group traces during merge.
    pub fn id(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.network, self.station, self.location, self.channel
        )
    }
}

/// A collection of decoded traces, optionally merged.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stream {
    pub traces: Vec<Trace>,
}

impl Stream {
    pub fn new(traces: Vec<Trace>) -> Self {
        Stream { traces }
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Trace> {
        self.traces.iter()
    }
}
