//! Walks the sequence of trace blocks in an RG16 file, producing a
//! [`Stream`]. Failure is all-or-nothing: any error aborts the whole call,
//! there is no partial trace list.
use rg16_core::field_reader::{read_bcd, read_binary, FieldWidth};
use rg16_core::{ByteSource, ReadOptions, Rg16Error, Stream};

use crate::initial_headers::read_initial_headers;
use crate::trace_decoder::{decode_trace, trace_block_byte_len};

/// Decode every trace block in `source` that falls within
/// `options.starttime..options.endtime`, honoring `headonly`/`details`, and
/// merging afterward if `options.merge` is set.
pub fn read_rg16(source: &impl ByteSource, options: &ReadOptions) -> Result<Stream, Rg16Error> {
    let initial_headers = read_initial_headers(source)?;
    let base_scan_interval = initial_headers.general_header_1.base_scan_interval;

    let nbr_channel_set = initial_headers.general_header_1.nbr_channel_set;
    let nbr_extended_headers = initial_headers.general_header_2.extended_header_blocks;
    let nbr_external_headers = initial_headers.general_header_2.external_header_blocks;
    let trace_block_start_0 = 32
        * (2 + nbr_channel_set as usize + nbr_extended_headers as usize + nbr_external_headers as usize);

    let nbr_records = compute_nbr_records(&initial_headers)?;
    log::debug!("walking {} trace blocks starting at byte {}", nbr_records, trace_block_start_0);

    let mut traces = Vec::new();
    let mut trace_block_start = trace_block_start_0;
    for _ in 0..nbr_records {
        let block_len = trace_block_byte_len(source, trace_block_start)?;
        let block_start_time =
            read_binary(source, trace_block_start + 20 + 2 * 32, FieldWidth::Bytes(8), true)? as f64
                / 1e6;
        if options.starttime.timestamp() <= block_start_time
            && block_start_time < options.endtime.timestamp()
        {
            let trace = decode_trace(
                source,
                trace_block_start,
                base_scan_interval,
                options.headonly,
                options.contacts_north,
                options.details,
            )?;
            traces.push(trace);
        }
        trace_block_start += block_len;
    }

    if options.merge {
        traces = crate::merge::quick_merge(traces)?;
    }

    Ok(Stream::new(traces))
}

/// Number of trace blocks in the file: the number of time slices times the
/// number of distinct channels (spec.md §4.4). Derived from
/// `extended_header_2.nbr_time_slices` and the distinct `RU_channel_number`
/// values across the channel-set descriptor table, exactly as the original
/// computes it.
fn compute_nbr_records(
    initial_headers: &rg16_core::InitialHeaders,
) -> Result<u64, Rg16Error> {
    let mut channel_numbers: Vec<u64> = initial_headers
        .channel_sets_descriptor
        .iter()
        .map(|cs| cs.ru_channel_number)
        .collect();
    channel_numbers.sort_unstable();
    channel_numbers.dedup();
    let nbr_component = channel_numbers.len() as u64;
    let nbr_time_slices = initial_headers.extended_headers.header_2.nbr_time_slices;
    Ok(nbr_time_slices * nbr_component)
}

/// Counts used by `is_rg16`-adjacent tooling that wants the raw header
/// block counts without decoding the full [`rg16_core::InitialHeaders`].
pub fn header_block_counts(source: &impl ByteSource) -> Result<(u64, u64, u64), Rg16Error> {
    let nbr_channel_set_headers = read_bcd(source, 28, FieldWidth::Bytes(1), true)?;
    let nbr_extended_headers = read_binary(source, 37, FieldWidth::Bytes(2), true)?;
    let nbr_external_headers = read_binary(source, 39, FieldWidth::Bytes(3), true)?;
    Ok((
        nbr_channel_set_headers,
        nbr_extended_headers,
        nbr_external_headers,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg16_core::UtcDateTime;

    /// Build a tiny single-channel, single-trace RG16 byte buffer: initial
    /// headers (1 channel set, 3 extended header blocks, no decimation
    /// tail) followed by one 3-extension-block trace with 2 samples.
    fn build_single_trace_file() -> Vec<u8> {
        let header_len = 64 + 32 + 32 * 3;
        let trace_header_len = 20 + 32 * 3;
        let npts = 2usize;
        let mut buf = vec![0u8; header_len + trace_header_len + npts * 4];

        buf[2] = 0x80;
        buf[3] = 0x58; // sample_format_code
        buf[16] = 0x20; // manufacturer_code
        buf[22] = 16; // base_scan_interval -> 1000 Hz
        buf[28] = 1; // nbr_channel_set (BCD)
        buf[37] = 0x00;
        buf[38] = 0x03; // extended_header_blocks = 3
        buf[42] = 0x01;
        buf[43] = 0x06; // version = 262

        // channel set descriptor at byte 64: RU_channel_number at +30
        buf[64 + 30] = 1;

        // extended_header_2.nbr_time_slices at (64+32+32)+16 .. = 1 time slice
        let eh2_start = 64 + 32 + 32;
        buf[eh2_start + 16] = 0;
        buf[eh2_start + 17] = 0;
        buf[eh2_start + 18] = 0;
        buf[eh2_start + 19] = 1;

        let trace_start = header_len;
        // trace preamble: nbr_trace_extension_block at +9
        buf[trace_start + 9] = 3;
        // component code (raw digit) at +40
        buf[trace_start + 40] = 7;
        // npts (3-byte binary) at +27
        buf[trace_start + 27] = 0;
        buf[trace_start + 28] = 0;
        buf[trace_start + 29] = npts as u8;
        // start time at preamble + 2*32 (inside extension block 3), 8-byte binary microseconds
        let start_time_pos = trace_start + 20 + 2 * 32;
        buf[start_time_pos + 7] = 0; // start_time = 0

        let sample_pos = trace_start + 20 + 3 * 32;
        let samples = [1.5f32, -2.5f32];
        for (i, s) in samples.iter().enumerate() {
            buf[sample_pos + i * 4..sample_pos + i * 4 + 4].copy_from_slice(&s.to_be_bytes());
        }
        buf
    }

    #[test]
    fn reads_single_trace_with_expected_samples() {
        let buf = build_single_trace_file();
        let stream = read_rg16(&buf, &rg16_core::ReadOptions::default()).unwrap();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.traces[0].samples, vec![1.5f32, -2.5f32]);
        assert_eq!(stream.traces[0].sampling_rate, 1000);
        assert_eq!(stream.traces[0].channel, "GP7");
    }

    #[test]
    fn starttime_filter_excludes_trace_block() {
        let buf = build_single_trace_file();
        let options = rg16_core::ReadOptions::default()
            .with_starttime(UtcDateTime::from_posix_seconds(10.0));
        let stream = read_rg16(&buf, &options).unwrap();
        assert!(stream.is_empty());
    }

    #[test]
    fn headonly_skips_sample_data() {
        let buf = build_single_trace_file();
        let options = rg16_core::ReadOptions::default().with_headonly(true);
        let stream = read_rg16(&buf, &options).unwrap();
        assert_eq!(stream.len(), 1);
        assert!(stream.traces[0].samples.is_empty());
        assert_eq!(stream.traces[0].npts, 2);
    }
}
