//! The trace header proper (preamble) and the fixed catalogue of the ten
//! possible 32-byte trace extension blocks.
use std::collections::BTreeMap;

use crate::enums::{
    EnergySourceType, PreampPath, RecordTypeCode, ShotStatusFlag, SourceOfFinalReceiverInfo,
    SourceOfFinalShotInfo, TestOscillatorSignal, TestSignalType, TraceClippedFlag,
};
use crate::headers::HeaderValue;
use crate::UtcDateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trace extension block 1: receiver identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock1 {
    pub extended_receiver_line_nbr: u64,
    pub extended_receiver_point_nbr: u64,
    pub sensor_type: u64,
    pub trace_count_file: u64,
}

/// Trace extension block 2: shot info.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock2 {
    pub shot_line_nbr: u64,
    pub shot_point: u64,
    pub shot_point_index: u64,
    pub shot_point_pre_plan_x: f64,
    pub shot_point_pre_plan_y: f64,
    pub shot_point_final_x: f64,
    pub shot_point_final_y: f64,
    pub shot_point_final_depth: f64,
    pub source_of_final_shot_info: SourceOfFinalShotInfo,
    pub energy_source_type: EnergySourceType,
}

/// Trace extension block 3: clock timing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock3 {
    pub epoch_time: UtcDateTime,
    /// Seconds.
    pub shot_skew_time: f64,
    /// Seconds.
    pub time_shift_clock_correction: f64,
    /// Seconds.
    pub remaining_clock_correction: f64,
}

/// Trace extension block 4: shot QC.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock4 {
    /// Seconds.
    pub pre_shot_guard_band: f64,
    /// Seconds.
    pub post_shot_guard_band: f64,
    /// dB.
    pub preamp_gain: u64,
    pub trace_clipped_flag: TraceClippedFlag,
    pub record_type_code: RecordTypeCode,
    pub shot_status_flag: ShotStatusFlag,
    pub external_shot_id: u64,
    pub post_processed_first_break_pick_time: f32,
    pub post_processed_rms_noise: f32,
}

/// Trace extension block 5: receiver position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock5 {
    pub receiver_point_pre_plan_x: f64,
    pub receiver_point_pre_plan_y: f64,
    pub receiver_point_final_x: f64,
    pub receiver_point_final_y: f64,
    pub receiver_point_final_depth: f64,
    pub source_of_final_receiver_info: SourceOfFinalReceiverInfo,
}

/// Trace extension block 6: tilt matrix rows x/y.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock6 {
    pub tilt_matrix_h1x: f32,
    pub tilt_matrix_h2x: f32,
    pub tilt_matrix_vx: f32,
    pub tilt_matrix_h1y: f32,
    pub tilt_matrix_h2y: f32,
    pub tilt_matrix_vy: f32,
    pub tilt_matrix_h1z: f32,
    pub tilt_matrix_h2z: f32,
}

/// Trace extension block 7: tilt matrix row z and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock7 {
    pub tilt_matrix_vz: f32,
    pub azimuth_degree: f32,
    pub pitch_degree: f32,
    pub roll_degree: f32,
    pub remote_unit_temp: f32,
    pub remote_unit_humidity: f32,
    pub orientation_matrix_version_nbr: u64,
    pub gimbal_corrections: u64,
}

/// Trace extension block 8: onboard test setup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock8 {
    pub fairfield_test_analysis_code: u64,
    pub first_test_oscillator_attenuation: u64,
    pub second_test_oscillator_attenuation: u64,
    /// Seconds.
    pub start_delay: f64,
    pub dc_filter_flag: u64,
    pub dc_filter_frequency: f32,
    pub preamp_path: PreampPath,
    pub test_oscillator_signal_type: TestOscillatorSignal,
}

/// Trace extension block 9: test signal generator setup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock9 {
    pub test_signal_generator_signal_type: TestSignalType,
    /// Hertz.
    pub test_signal_generator_frequency_1: f64,
    /// Hertz.
    pub test_signal_generator_frequency_2: f64,
    pub test_signal_generator_amplitude_1: u64,
    pub test_signal_generator_amplitude_2: u64,
    pub test_signal_generator_duty_cycle_percentage: f32,
    /// Seconds.
    pub test_signal_generator_active_duration: f64,
    /// Seconds.
    pub test_signal_generator_activation_time: f64,
}

/// Trace extension block 10: test signal generator pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceExtensionBlock10 {
    pub test_signal_generator_idle_level: u64,
    pub test_signal_generator_active_level: u64,
    pub test_signal_generator_pattern_1: u64,
    pub test_signal_generator_pattern_2: u64,
}

/// Everything read from a trace block's header region: the 20-byte
/// preamble plus whichever of the ten extension blocks are present.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceDetails {
    pub trace_number: u64,
    pub trace_edit_code: u64,
    pub block_1: Option<TraceExtensionBlock1>,
    pub block_2: Option<TraceExtensionBlock2>,
    pub block_3: Option<TraceExtensionBlock3>,
    pub block_4: Option<TraceExtensionBlock4>,
    pub block_5: Option<TraceExtensionBlock5>,
    pub block_6: Option<TraceExtensionBlock6>,
    pub block_7: Option<TraceExtensionBlock7>,
    pub block_8: Option<TraceExtensionBlock8>,
    pub block_9: Option<TraceExtensionBlock9>,
    pub block_10: Option<TraceExtensionBlock10>,
}

impl TraceDetails {
    pub fn to_detail_map(&self) -> HeaderValue {
        let mut map = BTreeMap::new();
        map.insert(
            "trace_number".to_string(),
            HeaderValue::UInt(self.trace_number),
        );
        map.insert(
            "trace_edit_code".to_string(),
            HeaderValue::UInt(self.trace_edit_code),
        );
        if let Some(b) = &self.block_1 {
            map.insert(
                "extended_receiver_line_nbr".to_string(),
                HeaderValue::UInt(b.extended_receiver_line_nbr),
            );
            map.insert(
                "extended_receiver_point_nbr".to_string(),
                HeaderValue::UInt(b.extended_receiver_point_nbr),
            );
            map.insert("sensor_type".to_string(), HeaderValue::UInt(b.sensor_type));
            map.insert(
                "trace_count_file".to_string(),
                HeaderValue::UInt(b.trace_count_file),
            );
        }
        if let Some(b) = &self.block_2 {
            map.insert("shot_line_nbr".to_string(), HeaderValue::UInt(b.shot_line_nbr));
            map.insert("shot_point".to_string(), HeaderValue::UInt(b.shot_point));
            map.insert(
                "shot_point_index".to_string(),
                HeaderValue::UInt(b.shot_point_index),
            );
            map.insert(
                "shot_point_pre_plan_x".to_string(),
                HeaderValue::Float(b.shot_point_pre_plan_x),
            );
            map.insert(
                "shot_point_pre_plan_y".to_string(),
                HeaderValue::Float(b.shot_point_pre_plan_y),
            );
            map.insert(
                "shot_point_final_x".to_string(),
                HeaderValue::Float(b.shot_point_final_x),
            );
            map.insert(
                "shot_point_final_y".to_string(),
                HeaderValue::Float(b.shot_point_final_y),
            );
            map.insert(
                "shot_point_final_depth".to_string(),
                HeaderValue::Float(b.shot_point_final_depth),
            );
            map.insert(
                "source_of_final_shot_info".to_string(),
                HeaderValue::Str(format!("{:?}", b.source_of_final_shot_info)),
            );
            map.insert(
                "energy_source_type".to_string(),
                HeaderValue::Str(format!("{:?}", b.energy_source_type)),
            );
        }
        if let Some(b) = &self.block_3 {
            map.insert(
                "epoch_time".to_string(),
                HeaderValue::Timestamp(b.epoch_time.timestamp()),
            );
            map.insert(
                "shot_skew_time".to_string(),
                HeaderValue::Float(b.shot_skew_time),
            );
            map.insert(
                "time_shift_clock_correction".to_string(),
                HeaderValue::Float(b.time_shift_clock_correction),
            );
            map.insert(
                "remaining_clock_correction".to_string(),
                HeaderValue::Float(b.remaining_clock_correction),
            );
        }
        if let Some(b) = &self.block_4 {
            map.insert(
                "pre_shot_guard_band".to_string(),
                HeaderValue::Float(b.pre_shot_guard_band),
            );
            map.insert(
                "post_shot_guard_band".to_string(),
                HeaderValue::Float(b.post_shot_guard_band),
            );
            map.insert("preamp_gain".to_string(), HeaderValue::UInt(b.preamp_gain));
            map.insert(
                "trace_clipped_flag".to_string(),
                HeaderValue::Str(format!("{:?}", b.trace_clipped_flag)),
            );
            map.insert(
                "record_type_code".to_string(),
                HeaderValue::Str(format!("{:?}", b.record_type_code)),
            );
            map.insert(
                "shot_status_flag".to_string(),
                HeaderValue::Str(format!("{:?}", b.shot_status_flag)),
            );
            map.insert(
                "external_shot_id".to_string(),
                HeaderValue::UInt(b.external_shot_id),
            );
            map.insert(
                "post_processed_first_break_pick_time".to_string(),
                HeaderValue::Float(b.post_processed_first_break_pick_time as f64),
            );
            map.insert(
                "post_processed_rms_noise".to_string(),
                HeaderValue::Float(b.post_processed_rms_noise as f64),
            );
        }
        if let Some(b) = &self.block_5 {
            map.insert(
                "receiver_point_pre_plan_x".to_string(),
                HeaderValue::Float(b.receiver_point_pre_plan_x),
            );
            map.insert(
                "receiver_point_pre_plan_y".to_string(),
                HeaderValue::Float(b.receiver_point_pre_plan_y),
            );
            map.insert(
                "receiver_point_final_x".to_string(),
                HeaderValue::Float(b.receiver_point_final_x),
            );
            map.insert(
                "receiver_point_final_y".to_string(),
                HeaderValue::Float(b.receiver_point_final_y),
            );
            map.insert(
                "receiver_point_final_depth".to_string(),
                HeaderValue::Float(b.receiver_point_final_depth),
            );
            map.insert(
                "source_of_final_receiver_info".to_string(),
                HeaderValue::Str(format!("{:?}", b.source_of_final_receiver_info)),
            );
        }
        if let Some(b) = &self.block_6 {
            map.insert("tilt_matrix_h1x".to_string(), HeaderValue::Float(b.tilt_matrix_h1x as f64));
            map.insert("tilt_matrix_h2x".to_string(), HeaderValue::Float(b.tilt_matrix_h2x as f64));
            map.insert("tilt_matrix_vx".to_string(), HeaderValue::Float(b.tilt_matrix_vx as f64));
            map.insert("tilt_matrix_h1y".to_string(), HeaderValue::Float(b.tilt_matrix_h1y as f64));
            map.insert("tilt_matrix_h2y".to_string(), HeaderValue::Float(b.tilt_matrix_h2y as f64));
            map.insert("tilt_matrix_vy".to_string(), HeaderValue::Float(b.tilt_matrix_vy as f64));
            map.insert("tilt_matrix_h1z".to_string(), HeaderValue::Float(b.tilt_matrix_h1z as f64));
            map.insert("tilt_matrix_h2z".to_string(), HeaderValue::Float(b.tilt_matrix_h2z as f64));
        }
        if let Some(b) = &self.block_7 {
            map.insert("tilt_matrix_vz".to_string(), HeaderValue::Float(b.tilt_matrix_vz as f64));
            map.insert("azimuth_degree".to_string(), HeaderValue::Float(b.azimuth_degree as f64));
            map.insert("pitch_degree".to_string(), HeaderValue::Float(b.pitch_degree as f64));
            map.insert("roll_degree".to_string(), HeaderValue::Float(b.roll_degree as f64));
            map.insert(
                "remote_unit_temp".to_string(),
                HeaderValue::Float(b.remote_unit_temp as f64),
            );
            map.insert(
                "remote_unit_humidity".to_string(),
                HeaderValue::Float(b.remote_unit_humidity as f64),
            );
            map.insert(
                "orientation_matrix_version_nbr".to_string(),
                HeaderValue::UInt(b.orientation_matrix_version_nbr),
            );
            map.insert(
                "gimbal_corrections".to_string(),
                HeaderValue::UInt(b.gimbal_corrections),
            );
        }
        if let Some(b) = &self.block_8 {
            map.insert(
                "fairfield_test_analysis_code".to_string(),
                HeaderValue::UInt(b.fairfield_test_analysis_code),
            );
            map.insert(
                "first_test_oscillator_attenuation".to_string(),
                HeaderValue::UInt(b.first_test_oscillator_attenuation),
            );
            map.insert(
                "second_test_oscillator_attenuation".to_string(),
                HeaderValue::UInt(b.second_test_oscillator_attenuation),
            );
            map.insert("start_delay".to_string(), HeaderValue::Float(b.start_delay));
            map.insert(
                "dc_filter_flag".to_string(),
                HeaderValue::UInt(b.dc_filter_flag),
            );
            map.insert(
                "dc_filter_frequency".to_string(),
                HeaderValue::Float(b.dc_filter_frequency as f64),
            );
            map.insert(
                "preamp_path".to_string(),
                HeaderValue::Str(format!("{:?}", b.preamp_path)),
            );
            map.insert(
                "test_oscillator_signal_type".to_string(),
                HeaderValue::Str(format!("{:?}", b.test_oscillator_signal_type)),
            );
        }
        if let Some(b) = &self.block_9 {
            map.insert(
                "test_signal_generator_signal_type".to_string(),
                HeaderValue::Str(format!("{:?}", b.test_signal_generator_signal_type)),
            );
            map.insert(
                "test_signal_generator_frequency_1".to_string(),
                HeaderValue::Float(b.test_signal_generator_frequency_1),
            );
            map.insert(
                "test_signal_generator_frequency_2".to_string(),
                HeaderValue::Float(b.test_signal_generator_frequency_2),
            );
            map.insert(
                "test_signal_generator_amplitude_1".to_string(),
                HeaderValue::UInt(b.test_signal_generator_amplitude_1),
            );
            map.insert(
                "test_signal_generator_amplitude_2".to_string(),
                HeaderValue::UInt(b.test_signal_generator_amplitude_2),
            );
            map.insert(
                "test_signal_generator_duty_cycle_percentage".to_string(),
                HeaderValue::Float(b.test_signal_generator_duty_cycle_percentage as f64),
            );
            map.insert(
                "test_signal_generator_active_duration".to_string(),
                HeaderValue::Float(b.test_signal_generator_active_duration),
            );
            map.insert(
                "test_signal_generator_activation_time".to_string(),
                HeaderValue::Float(b.test_signal_generator_activation_time),
            );
        }
        if let Some(b) = &self.block_10 {
            map.insert(
                "test_signal_generator_idle_level".to_string(),
                HeaderValue::UInt(b.test_signal_generator_idle_level),
            );
            map.insert(
                "test_signal_generator_active_level".to_string(),
                HeaderValue::UInt(b.test_signal_generator_active_level),
            );
            map.insert(
                "test_signal_generator_pattern_1".to_string(),
                HeaderValue::UInt(b.test_signal_generator_pattern_1),
            );
            map.insert(
                "test_signal_generator_pattern_2".to_string(),
                HeaderValue::UInt(b.test_signal_generator_pattern_2),
            );
        }
        HeaderValue::Map(map)
    }
}
