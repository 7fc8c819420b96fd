//! Decodes the four top-level initial-header records: the two general
//! header blocks, the channel-set descriptor table, and the extended
//! headers.
use rg16_core::field_reader::{read_bcd, read_binary, read_ieee_f32, FieldWidth};
use rg16_core::{
    ByteSource, ChannelSetDescriptor, ClockStopMethod, DataCollectionMethod, DataDecimationFlag,
    ExtendedHeader1, ExtendedHeader2, ExtendedHeader3, ExtendedHeaders,
    DecimationCoefficientsBlock, FrequencyDriftFlag, GeneralHeader1, GeneralHeader2,
    InitialHeaders, OscillatorType, Rg16Error,
};

const CHANNEL_SET_DESCRIPTOR_START: usize = 64;

/// Decode the whole initial-header region of a source, independent of
/// trace data. This is also reused by the trace-block walker before it
/// reads the first trace.
pub fn read_initial_headers(source: &impl ByteSource) -> Result<InitialHeaders, Rg16Error> {
    check_format_identity(source)?;
    let general_header_1 = read_general_header_1(source)?;
    let general_header_2 = read_general_header_2(source)?;
    let channel_sets_descriptor = read_channel_sets(source, general_header_1.nbr_channel_set)?;
    let extended_headers = read_extended_headers(
        source,
        general_header_1.nbr_channel_set,
        general_header_2.extended_header_blocks,
    )?;
    Ok(InitialHeaders {
        general_header_1,
        general_header_2,
        channel_sets_descriptor,
        extended_headers,
    })
}

/// `read_initial_headers`/`read_rg16` require the format identity to
/// match exactly, unlike [`crate::is_rg16`] which only reports it as a
/// boolean. A mismatch here is a hard error.
fn check_format_identity(source: &impl ByteSource) -> Result<(), Rg16Error> {
    let sample_format = read_bcd(source, 2, FieldWidth::Bytes(2), true)?;
    let manufacturer_code = read_bcd(source, 16, FieldWidth::Bytes(1), true)?;
    let version = read_binary(source, 42, FieldWidth::Bytes(2), true)?;
    if sample_format == 8058 && manufacturer_code == 20 && version == 262 {
        Ok(())
    } else {
        log::warn!(
            "rejecting source: expected sample_format=8058 manufacturer_code=20 version=262, \
             found {}/{}/{}",
            sample_format,
            manufacturer_code,
            version
        );
        Err(Rg16Error::NotRg16 {
            detected_version: version,
            detected_manufacturer: manufacturer_code,
            detected_sample_format: sample_format,
        })
    }
}

fn read_general_header_1(source: &impl ByteSource) -> Result<GeneralHeader1, Rg16Error> {
    Ok(GeneralHeader1 {
        file_number: read_bcd(source, 0, FieldWidth::Bytes(2), true)?,
        sample_format_code: read_bcd(source, 2, FieldWidth::Bytes(2), true)?,
        general_constant: read_bcd(source, 4, FieldWidth::Bytes(6), true)?,
        time_slice_year: read_bcd(source, 10, FieldWidth::Bytes(1), true)?,
        nbr_add_general_header: read_bcd(source, 11, FieldWidth::Nibble, true)?,
        julian_day: read_bcd(source, 11, FieldWidth::NibblePlusBytes(1), false)?,
        time_slice: read_bcd(source, 13, FieldWidth::Bytes(3), true)?,
        manufacturer_code: read_bcd(source, 16, FieldWidth::Bytes(1), true)?,
        manufacturer_serial_number: read_bcd(source, 17, FieldWidth::Bytes(2), true)?,
        base_scan_interval: read_binary(source, 22, FieldWidth::Bytes(1), true)?,
        polarity_code: read_binary(source, 23, FieldWidth::Nibble, true)?,
        record_type: read_binary(source, 25, FieldWidth::Nibble, true)?,
        scan_type_per_record: read_bcd(source, 27, FieldWidth::Bytes(1), true)?,
        nbr_channel_set: read_bcd(source, 28, FieldWidth::Bytes(1), true)?,
        nbr_skew_block: read_bcd(source, 29, FieldWidth::Bytes(1), true)?,
    })
}

fn read_general_header_2(source: &impl ByteSource) -> Result<GeneralHeader2, Rg16Error> {
    Ok(GeneralHeader2 {
        extended_file_number: read_binary(source, 32, FieldWidth::Bytes(3), true)?,
        extended_channel_sets_per_scan_type: read_binary(source, 35, FieldWidth::Bytes(2), true)?,
        extended_header_blocks: read_binary(source, 37, FieldWidth::Bytes(2), true)?,
        external_header_blocks: read_binary(source, 39, FieldWidth::Bytes(3), true)?,
        version_number: read_binary(source, 42, FieldWidth::Bytes(2), true)?,
        extended_record_length: read_binary(source, 46, FieldWidth::Bytes(3), true)?,
        general_header_block_number: read_binary(source, 50, FieldWidth::Bytes(1), true)?,
    })
}

fn read_channel_sets(
    source: &impl ByteSource,
    nbr_channel_set: u64,
) -> Result<Vec<ChannelSetDescriptor>, Rg16Error> {
    let mut sets = Vec::with_capacity(nbr_channel_set as usize);
    let mut start = CHANNEL_SET_DESCRIPTOR_START;
    for _ in 0..nbr_channel_set {
        sets.push(read_channel_set(source, start)?);
        start += 32;
    }
    Ok(sets)
}

fn read_channel_set(source: &impl ByteSource, start: usize) -> Result<ChannelSetDescriptor, Rg16Error> {
    Ok(ChannelSetDescriptor {
        scan_type_number: read_bcd(source, start, FieldWidth::Bytes(1), true)?,
        channel_set_number: read_bcd(source, start + 1, FieldWidth::Bytes(1), true)?,
        channel_set_start_time: read_binary(source, start + 2, FieldWidth::Bytes(2), true)? as f64
            * 2e-3,
        channel_set_end_time: read_binary(source, start + 4, FieldWidth::Bytes(2), true)? as f64
            * 2e-3,
        optional_mp_factor: read_binary(source, start + 6, FieldWidth::Bytes(1), true)?,
        mp_factor_descaler_multiplier: read_binary(source, start + 7, FieldWidth::Bytes(1), true)?,
        nbr_channels_in_channel_set: read_bcd(source, start + 8, FieldWidth::Bytes(2), true)?,
        channel_type_code: read_binary(source, start + 10, FieldWidth::Nibble, true)?,
        nbr_sub_scans: read_bcd(source, start + 11, FieldWidth::Nibble, true)?,
        gain_control_type: read_bcd(source, start + 11, FieldWidth::Nibble, false)?,
        alias_filter_frequency: read_bcd(source, start + 12, FieldWidth::Bytes(2), true)?,
        alias_filter_slope: read_bcd(source, start + 14, FieldWidth::Bytes(2), true)?,
        low_cut_filter_freq: read_bcd(source, start + 16, FieldWidth::Bytes(2), true)?,
        low_cut_filter_slope: read_bcd(source, start + 18, FieldWidth::Bytes(2), true)?,
        notch_filter_freq: read_bcd(source, start + 20, FieldWidth::Bytes(2), true)? as f64 / 10.0,
        notch_2_filter_freq: read_bcd(source, start + 22, FieldWidth::Bytes(2), true)? as f64
            / 10.0,
        notch_3_filter_freq: read_bcd(source, start + 24, FieldWidth::Bytes(2), true)? as f64
            / 10.0,
        extended_channel_set_number: read_binary(source, start + 26, FieldWidth::Bytes(2), true)?,
        extended_header_flag: read_binary(source, start + 28, FieldWidth::Nibble, true)?,
        nbr_32_byte_trace_header_extension: read_binary(
            source,
            start + 28,
            FieldWidth::Nibble,
            false,
        )?,
        vertical_stack_size: read_binary(source, start + 29, FieldWidth::Bytes(1), true)?,
        ru_channel_number: read_binary(source, start + 30, FieldWidth::Bytes(1), true)?,
        array_forming: read_binary(source, start + 31, FieldWidth::Bytes(1), true)?,
    })
}

fn read_extended_headers(
    source: &impl ByteSource,
    nbr_channel_set: u64,
    nbr_extended_headers: u64,
) -> Result<ExtendedHeaders, Rg16Error> {
    let mut start = 32 + 32 + 32 * nbr_channel_set as usize;
    let header_1 = read_extended_header_1(source, start)?;
    start += 32;
    let header_2 = read_extended_header_2(source, start)?;
    start += 32;
    let header_3 = read_extended_header_3(source, start)?;

    let mut decimation_blocks = Vec::new();
    if nbr_extended_headers > 3 {
        let nbr_coeff_remain = header_2.number_decimation_filter_coefficient % 8;
        for i in 3..nbr_extended_headers {
            start += 32;
            let block_number = i + 1;
            let count = if i == nbr_extended_headers - 1 {
                nbr_coeff_remain
            } else {
                8
            };
            decimation_blocks.push(read_decimation_block(source, start, block_number, count)?);
        }
    }

    Ok(ExtendedHeaders {
        header_1,
        header_2,
        header_3,
        decimation_blocks,
    })
}

fn read_extended_header_1(source: &impl ByteSource, start: usize) -> Result<ExtendedHeader1, Rg16Error> {
    Ok(ExtendedHeader1 {
        id_ru: read_binary(source, start, FieldWidth::Bytes(8), true)?,
        deployment_time: read_binary(source, start + 8, FieldWidth::Bytes(8), true)? as f64
            / 1e6,
        pick_up_time: read_binary(source, start + 16, FieldWidth::Bytes(8), true)? as f64 / 1e6,
        start_time_ru: read_binary(source, start + 24, FieldWidth::Bytes(8), true)? as f64
            / 1e6,
    })
}

fn read_extended_header_2(source: &impl ByteSource, start: usize) -> Result<ExtendedHeader2, Rg16Error> {
    Ok(ExtendedHeader2 {
        acquisition_drift_window: read_ieee_f32(source, start)? as f64 * 1e-6,
        clock_drift: read_binary(source, start + 4, FieldWidth::Bytes(8), true)? as f64 * 1e-9,
        clock_stop_method: ClockStopMethod::new(read_binary(
            source,
            start + 12,
            FieldWidth::Bytes(1),
            true,
        )?)?,
        frequency_drift: FrequencyDriftFlag::new(read_binary(
            source,
            start + 13,
            FieldWidth::Bytes(1),
            true,
        )?)?,
        oscillator_type: OscillatorType::new(read_binary(
            source,
            start + 14,
            FieldWidth::Bytes(1),
            true,
        )?)?,
        data_collection_method: DataCollectionMethod::new(read_binary(
            source,
            start + 15,
            FieldWidth::Bytes(1),
            true,
        )?)?,
        nbr_time_slices: read_binary(source, start + 16, FieldWidth::Bytes(4), true)?,
        nbr_files: read_binary(source, start + 20, FieldWidth::Bytes(4), true)?,
        file_number: read_binary(source, start + 24, FieldWidth::Bytes(4), true)?,
        data_decimation: DataDecimationFlag::new(read_binary(
            source,
            start + 28,
            FieldWidth::Bytes(1),
            true,
        )?)?,
        original_base_scan_interval: read_binary(source, start + 29, FieldWidth::Bytes(1), true)?,
        number_decimation_filter_coefficient: read_binary(
            source,
            start + 30,
            FieldWidth::Bytes(2),
            true,
        )?,
    })
}

fn read_extended_header_3(source: &impl ByteSource, start: usize) -> Result<ExtendedHeader3, Rg16Error> {
    Ok(ExtendedHeader3 {
        receiver_line_number: read_binary(source, start, FieldWidth::Bytes(4), true)?,
        receiver_point: read_binary(source, start + 4, FieldWidth::Bytes(4), true)?,
        receiver_point_index: read_binary(source, start + 8, FieldWidth::Bytes(1), true)?,
        first_shot_line: read_binary(source, start + 9, FieldWidth::Bytes(4), true)?,
        first_shot_point: read_binary(source, start + 13, FieldWidth::Bytes(4), true)?,
        first_shot_point_index: read_binary(source, start + 17, FieldWidth::Bytes(1), true)?,
        last_shot_line: read_binary(source, start + 18, FieldWidth::Bytes(4), true)?,
        last_shot_point: read_binary(source, start + 22, FieldWidth::Bytes(4), true)?,
        last_shot_point_index: read_binary(source, start + 26, FieldWidth::Bytes(1), true)?,
    })
}

fn read_decimation_block(
    source: &impl ByteSource,
    start: usize,
    block_number: u64,
    count: u64,
) -> Result<DecimationCoefficientsBlock, Rg16Error> {
    let mut coefficients = Vec::with_capacity(count as usize);
    let mut offset = start;
    for _ in 0..count {
        coefficients.push(read_ieee_f32(source, offset)?);
        offset += 4;
    }
    Ok(DecimationCoefficientsBlock {
        block_number,
        coefficients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal initial-header region: two general header blocks,
    /// `nbr_channel_set` channel-set descriptors, and the three fixed
    /// extended header blocks (no decimation tail).
    fn build_initial_headers(nbr_channel_set: u8) -> Vec<u8> {
        let total = 64 + 32 * nbr_channel_set as usize + 32 * 3;
        let mut buf = vec![0u8; total];
        buf[2] = 0x80;
        buf[3] = 0x58; // sample_format_code = 8058
        buf[16] = 0x20; // manufacturer_code = 20
        buf[28] = nbr_channel_set; // BCD 1-byte nbr_channel_set
        buf[37] = 0x00;
        buf[38] = 0x03; // extended_header_blocks = 3
        buf[42] = 0x01;
        buf[43] = 0x06; // version = 262
        buf
    }

    #[test]
    fn decodes_general_header_1_identity_fields() {
        let buf = build_initial_headers(1);
        let headers = read_initial_headers(&buf).unwrap();
        assert_eq!(headers.general_header_1.sample_format_code, 8058);
        assert_eq!(headers.general_header_1.manufacturer_code, 20);
        assert_eq!(headers.general_header_2.version_number, 262);
    }

    #[test]
    fn channel_set_count_matches_general_header_1() {
        let buf = build_initial_headers(3);
        let headers = read_initial_headers(&buf).unwrap();
        assert_eq!(headers.channel_sets_descriptor.len(), 3);
    }

    #[test]
    fn unknown_clock_stop_method_is_unknown_enum_code() {
        let mut buf = build_initial_headers(1);
        let ext_start = 64 + 32 + 32; // after 1 channel set + extended header 1
        buf[ext_start + 12] = 0xff; // clock_stop_method byte
        let err = read_initial_headers(&buf).unwrap_err();
        assert!(matches!(
            err,
            Rg16Error::UnknownEnumCode {
                field: "clock_stop_method",
                ..
            }
        ));
    }
}
