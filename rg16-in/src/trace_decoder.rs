//! Decodes a single trace block: its 20-byte preamble, its extension
//! blocks (when present), and optionally its sample data.
use rg16_core::field_reader::{read_bcd, read_binary, read_ieee_f32, FieldWidth};
use rg16_core::{
    ByteSource, EnergySourceType, PreampPath, RecordTypeCode, Rg16Error, ShotStatusFlag,
    SourceOfFinalReceiverInfo, SourceOfFinalShotInfo, TestOscillatorSignal, TestSignalType,
    Trace, TraceClippedFlag, TraceDetails, TraceExtensionBlock1, TraceExtensionBlock10,
    TraceExtensionBlock2, TraceExtensionBlock3, TraceExtensionBlock4, TraceExtensionBlock5,
    TraceExtensionBlock6, TraceExtensionBlock7, TraceExtensionBlock8, TraceExtensionBlock9,
    UtcDateTime, MAX_TRACE_EXTENSION_BLOCKS,
};

const BAND_CODE_HIGH: [u64; 2] = [2000, 1000];

/// Sampling rate in hertz, from the file-global `base_scan_interval` (spec
/// fidelity note: this field is read from absolute offset 22, not relative
/// to the current trace block).
pub fn sampling_rate_from_base_scan_interval(base_scan_interval: u64) -> Result<u32, Rg16Error> {
    let hz = 1000.0 / (base_scan_interval as f64 / 16.0);
    let hz = hz.round() as u64;
    match hz {
        2000 | 1000 | 500 | 250 => Ok(hz as u32),
        _ => Err(Rg16Error::UnknownEnumCode {
            field: "sampling_rate",
            code: hz,
        }),
    }
}

/// `sampling_rate` is always one of {2000, 1000, 500, 250}, enforced by
/// `sampling_rate_from_base_scan_interval`.
fn band_code(sampling_rate: u32) -> char {
    if BAND_CODE_HIGH.contains(&(sampling_rate as u64)) {
        'G'
    } else {
        'D'
    }
}

fn component_code(raw: u64, contacts_north: bool) -> Result<String, Rg16Error> {
    if contacts_north {
        let mapped = match raw {
            2 => 'Z',
            3 => 'N',
            4 => 'E',
            _ => {
                return Err(Rg16Error::UnknownEnumCode {
                    field: "component",
                    code: raw,
                })
            }
        };
        Ok(mapped.to_string())
    } else {
        Ok(raw.to_string())
    }
}

/// Decode everything about the trace block starting at `trace_block_start`
/// except its byte length (the walker computes that separately to know how
/// far to advance).
pub fn decode_trace(
    source: &impl ByteSource,
    trace_block_start: usize,
    base_scan_interval: u64,
    headonly: bool,
    contacts_north: bool,
    details: bool,
) -> Result<Trace, Rg16Error> {
    let sampling_rate = sampling_rate_from_base_scan_interval(base_scan_interval)?;

    let nbr_trace_extension_block =
        read_binary(source, trace_block_start + 9, FieldWidth::Bytes(1), true)?;
    if nbr_trace_extension_block > MAX_TRACE_EXTENSION_BLOCKS as u64 {
        return Err(Rg16Error::UnknownTraceExtensionBlock {
            index: nbr_trace_extension_block as u8,
        });
    }

    let raw_component = read_binary(source, trace_block_start + 40, FieldWidth::Bytes(1), true)?;
    let component = component_code(raw_component, contacts_north)?;
    let channel = format!("{}P{}", band_code(sampling_rate), component);

    let npts = read_binary(source, trace_block_start + 27, FieldWidth::Bytes(3), true)?;
    let start_time_secs =
        read_binary(source, trace_block_start + 20 + 2 * 32, FieldWidth::Bytes(8), true)? as f64
            / 1e6;
    let end_time_secs = if npts > 0 {
        start_time_secs + (npts - 1) as f64 / sampling_rate as f64
    } else {
        start_time_secs
    };

    let network = read_binary(source, trace_block_start + 20, FieldWidth::Bytes(3), true)?.to_string();
    let station = read_binary(source, trace_block_start + 23, FieldWidth::Bytes(3), true)?.to_string();
    let location = read_binary(source, trace_block_start + 26, FieldWidth::Bytes(1), true)?.to_string();

    let samples = if headonly {
        Vec::new()
    } else {
        let trace_start = trace_block_start + 20 + nbr_trace_extension_block as usize * 32;
        let mut samples = Vec::with_capacity(npts as usize);
        for i in 0..npts as usize {
            let sample = read_ieee_f32(source, trace_start + i * 4)?;
            samples.push(if channel.ends_with('Z') { -sample } else { sample });
        }
        samples
    };

    let trace_details = if details {
        Some(read_trace_details(
            source,
            trace_block_start,
            nbr_trace_extension_block,
        )?)
    } else {
        None
    };

    Ok(Trace {
        network,
        station,
        location,
        channel,
        starttime: UtcDateTime::from_posix_seconds(start_time_secs),
        endtime: UtcDateTime::from_posix_seconds(end_time_secs),
        sampling_rate,
        npts,
        samples,
        details: trace_details,
    })
}

/// Length in bytes of `trace_block_start`'s header + data, used by the
/// walker to find the next trace block without fully decoding this one.
pub fn trace_block_byte_len(source: &impl ByteSource, trace_block_start: usize) -> Result<usize, Rg16Error> {
    let nbr_trace_extension_block =
        read_binary(source, trace_block_start + 9, FieldWidth::Bytes(1), true)?;
    let nbr_sample_trace = read_binary(source, trace_block_start + 27, FieldWidth::Bytes(3), true)?;
    let header_len = 20 + 32 * nbr_trace_extension_block as usize;
    let data_len = nbr_sample_trace as usize * 4;
    Ok(header_len + data_len)
}

fn read_trace_details(
    source: &impl ByteSource,
    trace_block_start: usize,
    nbr_trace_extension_block: u64,
) -> Result<TraceDetails, Rg16Error> {
    let mut details = TraceDetails {
        trace_number: read_bcd(source, trace_block_start + 4, FieldWidth::Bytes(2), true)?,
        trace_edit_code: read_binary(source, trace_block_start + 11, FieldWidth::Bytes(1), true)?,
        ..Default::default()
    };

    for index in 1..=nbr_trace_extension_block {
        let pos = trace_block_start + 20 + 32 * (index as usize - 1);
        match index {
            1 => details.block_1 = Some(read_block_1(source, pos)?),
            2 => details.block_2 = Some(read_block_2(source, pos)?),
            3 => details.block_3 = Some(read_block_3(source, pos)?),
            4 => details.block_4 = Some(read_block_4(source, pos)?),
            5 => details.block_5 = Some(read_block_5(source, pos)?),
            6 => details.block_6 = Some(read_block_6(source, pos)?),
            7 => details.block_7 = Some(read_block_7(source, pos)?),
            8 => details.block_8 = Some(read_block_8(source, pos)?),
            9 => details.block_9 = Some(read_block_9(source, pos)?),
            10 => details.block_10 = Some(read_block_10(source, pos)?),
            other => return Err(Rg16Error::UnknownTraceExtensionBlock { index: other as u8 }),
        }
    }
    Ok(details)
}

fn read_block_1(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock1, Rg16Error> {
    Ok(TraceExtensionBlock1 {
        extended_receiver_line_nbr: read_binary(source, pos + 10, FieldWidth::Bytes(5), true)?,
        extended_receiver_point_nbr: read_binary(source, pos + 15, FieldWidth::Bytes(5), true)?,
        sensor_type: read_binary(source, pos + 20, FieldWidth::Bytes(1), true)?,
        trace_count_file: read_binary(source, pos + 21, FieldWidth::Bytes(4), true)?,
    })
}

fn read_block_2(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock2, Rg16Error> {
    Ok(TraceExtensionBlock2 {
        shot_line_nbr: read_binary(source, pos, FieldWidth::Bytes(4), true)?,
        shot_point: read_binary(source, pos + 4, FieldWidth::Bytes(4), true)?,
        shot_point_index: read_binary(source, pos + 8, FieldWidth::Bytes(1), true)?,
        shot_point_pre_plan_x: read_binary(source, pos + 9, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        shot_point_pre_plan_y: read_binary(source, pos + 13, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        shot_point_final_x: read_binary(source, pos + 17, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        shot_point_final_y: read_binary(source, pos + 21, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        shot_point_final_depth: read_binary(source, pos + 25, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        source_of_final_shot_info: SourceOfFinalShotInfo::new(read_binary(
            source,
            pos + 29,
            FieldWidth::Bytes(1),
            true,
        )?)?,
        energy_source_type: EnergySourceType::new(read_binary(
            source,
            pos + 30,
            FieldWidth::Bytes(1),
            true,
        )?)?,
    })
}

fn read_block_3(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock3, Rg16Error> {
    Ok(TraceExtensionBlock3 {
        epoch_time: UtcDateTime::from_posix_seconds(
            read_binary(source, pos, FieldWidth::Bytes(8), true)? as f64 / 1e6,
        ),
        shot_skew_time: read_binary(source, pos + 8, FieldWidth::Bytes(8), true)? as f64 / 1e6,
        time_shift_clock_correction: read_binary(source, pos + 16, FieldWidth::Bytes(8), true)?
            as f64
            / 1e9,
        remaining_clock_correction: read_binary(source, pos + 24, FieldWidth::Bytes(8), true)?
            as f64
            / 1e9,
    })
}

fn read_block_4(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock4, Rg16Error> {
    Ok(TraceExtensionBlock4 {
        pre_shot_guard_band: read_binary(source, pos, FieldWidth::Bytes(4), true)? as f64 / 1e3,
        post_shot_guard_band: read_binary(source, pos + 4, FieldWidth::Bytes(4), true)? as f64
            / 1e3,
        preamp_gain: read_binary(source, pos + 8, FieldWidth::Bytes(1), true)?,
        trace_clipped_flag: TraceClippedFlag::new(read_binary(
            source,
            pos + 9,
            FieldWidth::Bytes(1),
            true,
        )?)?,
        record_type_code: RecordTypeCode::new(read_binary(source, pos + 10, FieldWidth::Bytes(1), true)?)?,
        shot_status_flag: ShotStatusFlag::new(read_binary(source, pos + 11, FieldWidth::Bytes(1), true)?)?,
        external_shot_id: read_binary(source, pos + 12, FieldWidth::Bytes(4), true)?,
        post_processed_first_break_pick_time: read_ieee_f32(source, pos + 24)?,
        post_processed_rms_noise: read_ieee_f32(source, pos + 28)?,
    })
}

fn read_block_5(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock5, Rg16Error> {
    Ok(TraceExtensionBlock5 {
        receiver_point_pre_plan_x: read_binary(source, pos + 9, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        receiver_point_pre_plan_y: read_binary(source, pos + 13, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        receiver_point_final_x: read_binary(source, pos + 17, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        receiver_point_final_y: read_binary(source, pos + 21, FieldWidth::Bytes(4), true)? as f64
            / 10.0,
        receiver_point_final_depth: read_binary(source, pos + 25, FieldWidth::Bytes(4), true)?
            as f64
            / 10.0,
        source_of_final_receiver_info: SourceOfFinalReceiverInfo::new(read_binary(
            source,
            pos + 29,
            FieldWidth::Bytes(1),
            true,
        )?)?,
    })
}

fn read_block_6(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock6, Rg16Error> {
    Ok(TraceExtensionBlock6 {
        tilt_matrix_h1x: read_ieee_f32(source, pos)?,
        tilt_matrix_h2x: read_ieee_f32(source, pos + 4)?,
        tilt_matrix_vx: read_ieee_f32(source, pos + 8)?,
        tilt_matrix_h1y: read_ieee_f32(source, pos + 12)?,
        tilt_matrix_h2y: read_ieee_f32(source, pos + 16)?,
        tilt_matrix_vy: read_ieee_f32(source, pos + 20)?,
        tilt_matrix_h1z: read_ieee_f32(source, pos + 24)?,
        tilt_matrix_h2z: read_ieee_f32(source, pos + 28)?,
    })
}

fn read_block_7(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock7, Rg16Error> {
    Ok(TraceExtensionBlock7 {
        tilt_matrix_vz: read_ieee_f32(source, pos)?,
        azimuth_degree: read_ieee_f32(source, pos + 4)?,
        pitch_degree: read_ieee_f32(source, pos + 8)?,
        roll_degree: read_ieee_f32(source, pos + 12)?,
        remote_unit_temp: read_ieee_f32(source, pos + 16)?,
        remote_unit_humidity: read_ieee_f32(source, pos + 20)?,
        orientation_matrix_version_nbr: read_binary(source, pos + 24, FieldWidth::Bytes(4), true)?,
        gimbal_corrections: read_binary(source, pos + 28, FieldWidth::Bytes(1), true)?,
    })
}

fn read_block_8(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock8, Rg16Error> {
    Ok(TraceExtensionBlock8 {
        fairfield_test_analysis_code: read_binary(source, pos, FieldWidth::Bytes(4), true)?,
        first_test_oscillator_attenuation: read_binary(source, pos + 4, FieldWidth::Bytes(4), true)?,
        second_test_oscillator_attenuation: read_binary(source, pos + 8, FieldWidth::Bytes(4), true)?,
        start_delay: read_binary(source, pos + 12, FieldWidth::Bytes(4), true)? as f64 / 1e6,
        dc_filter_flag: read_binary(source, pos + 16, FieldWidth::Bytes(4), true)?,
        dc_filter_frequency: read_ieee_f32(source, pos + 20)?,
        preamp_path: PreampPath::new(read_binary(source, pos + 24, FieldWidth::Bytes(4), true)?)?,
        test_oscillator_signal_type: TestOscillatorSignal::new(read_binary(
            source,
            pos + 28,
            FieldWidth::Bytes(4),
            true,
        )?)?,
    })
}

fn read_block_9(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock9, Rg16Error> {
    Ok(TraceExtensionBlock9 {
        test_signal_generator_signal_type: TestSignalType::new(read_binary(
            source,
            pos,
            FieldWidth::Bytes(4),
            true,
        )?)?,
        test_signal_generator_frequency_1: read_binary(source, pos + 4, FieldWidth::Bytes(4), true)?
            as f64
            / 1e3,
        test_signal_generator_frequency_2: read_binary(source, pos + 8, FieldWidth::Bytes(4), true)?
            as f64
            / 1e3,
        test_signal_generator_amplitude_1: read_binary(source, pos + 12, FieldWidth::Bytes(4), true)?,
        test_signal_generator_amplitude_2: read_binary(source, pos + 16, FieldWidth::Bytes(4), true)?,
        test_signal_generator_duty_cycle_percentage: read_ieee_f32(source, pos + 20)?,
        test_signal_generator_active_duration: read_binary(source, pos + 24, FieldWidth::Bytes(4), true)?
            as f64
            / 1e6,
        test_signal_generator_activation_time: read_binary(source, pos + 28, FieldWidth::Bytes(4), true)?
            as f64
            / 1e6,
    })
}

fn read_block_10(source: &impl ByteSource, pos: usize) -> Result<TraceExtensionBlock10, Rg16Error> {
    Ok(TraceExtensionBlock10 {
        test_signal_generator_idle_level: read_binary(source, pos, FieldWidth::Bytes(4), true)?,
        test_signal_generator_active_level: read_binary(source, pos + 4, FieldWidth::Bytes(4), true)?,
        test_signal_generator_pattern_1: read_binary(source, pos + 8, FieldWidth::Bytes(4), true)?,
        test_signal_generator_pattern_2: read_binary(source, pos + 12, FieldWidth::Bytes(4), true)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_rate_formula() {
        assert_eq!(sampling_rate_from_base_scan_interval(16).unwrap(), 1000);
        assert_eq!(sampling_rate_from_base_scan_interval(8).unwrap(), 2000);
        assert_eq!(sampling_rate_from_base_scan_interval(32).unwrap(), 500);
    }

    #[test]
    fn sampling_rate_rejects_unknown_value() {
        assert!(sampling_rate_from_base_scan_interval(7).is_err());
    }

    #[test]
    fn component_code_plain_digit_without_remap() {
        assert_eq!(component_code(7, false).unwrap(), "7");
    }

    #[test]
    fn component_code_remaps_under_contacts_north() {
        assert_eq!(component_code(2, true).unwrap(), "Z");
        assert_eq!(component_code(3, true).unwrap(), "N");
        assert_eq!(component_code(4, true).unwrap(), "E");
        assert!(component_code(9, true).is_err());
    }
}
