//! Crate-level integration tests, exercising the public API
//! (`is_rg16`/`read_initial_headers`/`read_rg16`) against synthetic RG16
//! byte buffers built by hand, since no real fixture files ship with this
//! crate.
use rg16_core::{ReadOptions, Rg16Error, UtcDateTime};

use crate::{is_rg16, read_initial_headers, read_rg16};

/// Build a single-channel-set initial-header region with 3 fixed extended
/// header blocks (no decimation tail) and no trace data.
fn build_initial_headers() -> Vec<u8> {
    let total = 64 + 32 + 32 * 3;
    let mut buf = vec![0u8; total];
    buf[2] = 0x80;
    buf[3] = 0x58; // sample_format_code = 8058
    buf[16] = 0x20; // manufacturer_code = 20
    buf[22] = 16; // base_scan_interval -> 1000 Hz
    buf[28] = 1; // nbr_channel_set (BCD)
    buf[37] = 0x00;
    buf[38] = 0x03; // extended_header_blocks = 3
    buf[42] = 0x01;
    buf[43] = 0x06; // version = 262

    // channel set descriptor at byte 64: RU_channel_number at +30
    buf[64 + 30] = 1;

    // extended_header_2.nbr_time_slices at (64+32+32)+16, 4-byte binary
    let eh2_start = 64 + 32 + 32;
    buf[eh2_start + 19] = 1;
    buf
}

/// Append one trace block (3 extension blocks) at `start`, with the given
/// component digit, start time (posix seconds) and sample values. Returns
/// the byte length of the appended block.
fn append_trace(buf: &mut Vec<u8>, component: u8, start_secs: f64, samples: &[f32]) -> usize {
    let trace_start = buf.len();
    let header_len = 20 + 32 * 3;
    let npts = samples.len();
    buf.resize(trace_start + header_len + npts * 4, 0);

    buf[trace_start + 9] = 3; // nbr_trace_extension_block
    buf[trace_start + 40] = component;
    let npts_bytes = (npts as u32).to_be_bytes();
    buf[trace_start + 27..trace_start + 30].copy_from_slice(&npts_bytes[1..]);

    let start_time_us = (start_secs * 1e6).round() as i64;
    let start_time_pos = trace_start + 20 + 2 * 32;
    buf[start_time_pos..start_time_pos + 8].copy_from_slice(&start_time_us.to_be_bytes());

    let sample_pos = trace_start + 20 + 3 * 32;
    for (i, s) in samples.iter().enumerate() {
        buf[sample_pos + i * 4..sample_pos + i * 4 + 4].copy_from_slice(&s.to_be_bytes());
    }
    header_len + npts * 4
}

#[test]
fn rejects_non_rg16_source() {
    let buf = vec![0u8; 128];
    assert!(!is_rg16(&buf));
    let err = read_initial_headers(&buf).unwrap_err();
    assert!(matches!(
        err,
        Rg16Error::NotRg16 {
            detected_version: 0,
            detected_manufacturer: 0,
            detected_sample_format: 0,
        }
    ));
}

#[test]
fn recognizes_and_decodes_a_well_formed_file() {
    let buf = build_initial_headers();
    assert!(is_rg16(&buf));
    let headers = read_initial_headers(&buf).unwrap();
    assert_eq!(headers.general_header_1.nbr_channel_set, 1);
    assert_eq!(headers.extended_headers.header_2.nbr_time_slices, 1);
}

#[test]
fn details_round_trip_exposes_nested_header_values() {
    let mut buf = build_initial_headers();
    append_trace(&mut buf, 7, 0.0, &[1.5, -2.5]);

    let options = ReadOptions::default().with_details(true);
    let stream = read_rg16(&buf, &options).unwrap();
    assert_eq!(stream.len(), 1);

    let details = stream.traces[0].details.as_ref().unwrap();
    let map = match details.to_detail_map() {
        rg16_core::HeaderValue::Map(m) => m,
        other => panic!("expected a map, got {:?}", other),
    };
    assert!(map.contains_key("trace_number"));

    let headers = read_initial_headers(&buf).unwrap();
    let header_map = match headers.to_detail_map() {
        rg16_core::HeaderValue::Map(m) => m,
        other => panic!("expected a map, got {:?}", other),
    };
    assert!(header_map.contains_key("general_header_1"));
    assert!(header_map.contains_key("channel_sets_descriptor"));
}

#[test]
fn contacts_north_negates_z_component_and_remaps_channel() {
    let mut buf = build_initial_headers();
    append_trace(&mut buf, 2, 0.0, &[1.0, 2.0, -3.0]);

    let options = ReadOptions::default().with_contacts_north(true);
    let stream = read_rg16(&buf, &options).unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.traces[0].channel, "GPZ");
    assert_eq!(stream.traces[0].samples, vec![-1.0, -2.0, 3.0]);
}

#[test]
fn contacts_north_rejects_unmapped_component_code() {
    let mut buf = build_initial_headers();
    append_trace(&mut buf, 9, 0.0, &[1.0]);

    let options = ReadOptions::default().with_contacts_north(true);
    let err = read_rg16(&buf, &options).unwrap_err();
    assert!(matches!(
        err,
        Rg16Error::UnknownEnumCode {
            field: "component",
            code: 9,
        }
    ));
}

#[test]
fn merge_concatenates_contiguous_same_channel_traces() {
    let mut buf = build_initial_headers();
    // eh2 nbr_time_slices = 2 so the walker expects 2 records for 1 channel.
    let eh2_start = 64 + 32 + 32;
    buf[eh2_start + 19] = 2;

    append_trace(&mut buf, 7, 0.0, &[1.0, 2.0]);
    append_trace(&mut buf, 7, 0.002, &[3.0, 4.0]);

    let options = ReadOptions::default().with_merge(true);
    let stream = read_rg16(&buf, &options).unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.traces[0].samples, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(stream.traces[0].npts, 4);
}

#[test]
fn without_merge_contiguous_traces_stay_separate() {
    let mut buf = build_initial_headers();
    let eh2_start = 64 + 32 + 32;
    buf[eh2_start + 19] = 2;

    append_trace(&mut buf, 7, 0.0, &[1.0, 2.0]);
    append_trace(&mut buf, 7, 0.002, &[3.0, 4.0]);

    let stream = read_rg16(&buf, &ReadOptions::default()).unwrap();
    assert_eq!(stream.len(), 2);
}

#[test]
fn starttime_endtime_window_filters_records() {
    let mut buf = build_initial_headers();
    let eh2_start = 64 + 32 + 32;
    buf[eh2_start + 19] = 2;

    append_trace(&mut buf, 7, 0.0, &[1.0]);
    append_trace(&mut buf, 7, 10.0, &[2.0]);

    let options = ReadOptions::default()
        .with_starttime(UtcDateTime::from_posix_seconds(5.0))
        .with_endtime(UtcDateTime::from_posix_seconds(20.0));
    let stream = read_rg16(&buf, &options).unwrap();
    assert_eq!(stream.len(), 1);
    assert_eq!(stream.traces[0].samples, vec![2.0]);
}
