//! A library for parsing Fairfield Nodal's Receiver Gather File Format
//! version 1.6-1 ("RG16").
//!
//! Three entry points cover the whole surface:
//!
//! - [`is_rg16`] — a cheap probe for "does this look like an RG16 file?"
//! - [`read_initial_headers`] — decode the header region without touching
//!   trace data.
//! - [`read_rg16`] — decode the full file (or a time-windowed subset of it)
//!   into a [`Stream`].
//!
//! This library is read-only: it has no counterpart for writing RG16 files.
extern crate memmap2;
extern crate num;

mod initial_headers;
mod merge;
pub mod memory_map;
mod probe;
mod trace_decoder;
mod trace_walker;
#[cfg(test)]
mod tests;

pub use rg16_core::{ReadOptions, Rg16Error, Stream, Trace, UtcDateTime};

pub use memory_map::MappedRg16;

/// Returns true if `source` looks like an RG16 v1.6-1 file: `version ==
/// 262`, `manufacturer_code == 20`, `sample_format_code == 8058`. Any read
/// failure (e.g. the source is too short) is treated as "not RG16".
pub fn is_rg16(source: &impl rg16_core::ByteSource) -> bool {
    probe::is_rg16(source)
}

/// Decode the initial-header region (general headers, channel-set
/// descriptors, extended headers) without reading any trace data.
pub fn read_initial_headers(
    source: &impl rg16_core::ByteSource,
) -> Result<rg16_core::InitialHeaders, Rg16Error> {
    initial_headers::read_initial_headers(source)
}

/// Decode an RG16 file (or in-memory buffer) into a [`Stream`] according to
/// `options`. Failure is all-or-nothing: any malformed header or trace
/// block aborts the whole call.
pub fn read_rg16(source: &impl rg16_core::ByteSource, options: &ReadOptions) -> Result<Stream, Rg16Error> {
    trace_walker::read_rg16(source, options)
}

/// Convenience: memory-map `path` and decode it in one call.
pub fn read_rg16_file(path: &str, options: &ReadOptions) -> Result<Stream, Rg16Error> {
    let mapped = MappedRg16::open(path)?;
    read_rg16(&mapped, options)
}
