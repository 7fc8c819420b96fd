//! Parsed representations of the RG16 initial headers: the two general
//! header blocks, the channel-set descriptor table, and the extended
//! headers (including the decimation-coefficient tail blocks).
use std::collections::BTreeMap;

use crate::enums::{ClockStopMethod, DataCollectionMethod, DataDecimationFlag, FrequencyDriftFlag, OscillatorType};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tagged value used to render header structures as nested maps for the
/// `details = true` output path, without committing every header field to
/// a single concrete Rust type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeaderValue {
    UInt(u64),
    Int(i64),
    Float(f64),
    Str(String),
    /// Seconds since the Unix epoch.
    Timestamp(f64),
    Map(BTreeMap<String, HeaderValue>),
}

impl From<u64> for HeaderValue {
    fn from(v: u64) -> Self {
        HeaderValue::UInt(v)
    }
}

impl From<f64> for HeaderValue {
    fn from(v: f64) -> Self {
        HeaderValue::Float(v)
    }
}

impl From<f32> for HeaderValue {
    fn from(v: f32) -> Self {
        HeaderValue::Float(v as f64)
    }
}

impl From<String> for HeaderValue {
    fn from(v: String) -> Self {
        HeaderValue::Str(v)
    }
}

/// Build a `HeaderValue::Map` from `(name, value)` pairs in declaration
/// order, keeping a `BTreeMap` for deterministic iteration.
macro_rules! header_map {
    ($($key:expr => $val:expr),* $(,)?) => {{
        let mut map = BTreeMap::new();
        $(map.insert($key.to_string(), HeaderValue::from($val));)*
        HeaderValue::Map(map)
    }};
}

/// General header block 1, bytes 0..32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneralHeader1 {
    /// Bytes 0..2, BCD.
    pub file_number: u64,
    /// Bytes 2..4, BCD. Must be 8058 for this to be an RG16 file.
    pub sample_format_code: u64,
    /// Bytes 4..10, BCD.
    pub general_constant: u64,
    /// Byte 10, BCD.
    pub time_slice_year: u64,
    /// Byte 11 high nibble, BCD.
    pub nbr_add_general_header: u64,
    /// Byte 11 low nibble + byte 12, BCD.
    pub julian_day: u64,
    /// Bytes 13..16, BCD.
    pub time_slice: u64,
    /// Byte 16, BCD. Must be 20 for this to be an RG16 file.
    pub manufacturer_code: u64,
    /// Bytes 17..19, BCD.
    pub manufacturer_serial_number: u64,
    /// Byte 22, binary. Drives the sampling-rate formula.
    pub base_scan_interval: u64,
    /// Byte 23 high nibble, binary.
    pub polarity_code: u64,
    /// Byte 25 high nibble, binary.
    pub record_type: u64,
    /// Byte 27, BCD.
    pub scan_type_per_record: u64,
    /// Byte 28, BCD. Count of channel-set descriptor blocks that follow.
    pub nbr_channel_set: u64,
    /// Byte 29, BCD.
    pub nbr_skew_block: u64,
}

impl GeneralHeader1 {
    pub fn to_detail_map(&self) -> HeaderValue {
        header_map! {
            "file_number" => self.file_number,
            "sample_format_code" => self.sample_format_code,
            "general_constant" => self.general_constant,
            "time_slice_year" => self.time_slice_year,
            "nbr_add_general_header" => self.nbr_add_general_header,
            "julian_day" => self.julian_day,
            "time_slice" => self.time_slice,
            "manufacturer_code" => self.manufacturer_code,
            "manufacturer_serial_number" => self.manufacturer_serial_number,
            "base_scan_interval" => self.base_scan_interval,
            "polarity_code" => self.polarity_code,
            "record_type" => self.record_type,
            "scan_type_per_record" => self.scan_type_per_record,
            "nbr_channel_set" => self.nbr_channel_set,
            "nbr_skew_block" => self.nbr_skew_block,
        }
    }
}

/// General header block 2, bytes 32..64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneralHeader2 {
    /// Bytes 32..35, binary.
    pub extended_file_number: u64,
    /// Bytes 35..37, binary.
    pub extended_channel_sets_per_scan_type: u64,
    /// Bytes 37..39, binary. Count of extended header blocks.
    pub extended_header_blocks: u64,
    /// Bytes 39..42, binary.
    pub external_header_blocks: u64,
    /// Bytes 42..44, binary. Must be 262 for this to be an RG16 file.
    pub version_number: u64,
    /// Bytes 46..49, binary.
    pub extended_record_length: u64,
    /// Byte 50, binary.
    pub general_header_block_number: u64,
}

impl GeneralHeader2 {
    pub fn to_detail_map(&self) -> HeaderValue {
        header_map! {
            "extended_file_number" => self.extended_file_number,
            "extended_channel_sets_per_scan_type" => self.extended_channel_sets_per_scan_type,
            "extended_header_blocks" => self.extended_header_blocks,
            "external_header_blocks" => self.external_header_blocks,
            "version_number" => self.version_number,
            "extended_record_length" => self.extended_record_length,
            "general_header_block_number" => self.general_header_block_number,
        }
    }
}

/// One 32-byte channel-set descriptor block.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelSetDescriptor {
    pub scan_type_number: u64,
    pub channel_set_number: u64,
    /// Seconds.
    pub channel_set_start_time: f64,
    /// Seconds.
    pub channel_set_end_time: f64,
    pub optional_mp_factor: u64,
    pub mp_factor_descaler_multiplier: u64,
    pub nbr_channels_in_channel_set: u64,
    pub channel_type_code: u64,
    pub nbr_sub_scans: u64,
    pub gain_control_type: u64,
    /// Hertz.
    pub alias_filter_frequency: u64,
    /// dB per octave.
    pub alias_filter_slope: u64,
    /// Hertz.
    pub low_cut_filter_freq: u64,
    /// dB per octave.
    pub low_cut_filter_slope: u64,
    /// Hertz.
    pub notch_filter_freq: f64,
    /// Hertz.
    pub notch_2_filter_freq: f64,
    /// Hertz.
    pub notch_3_filter_freq: f64,
    pub extended_channel_set_number: u64,
    pub extended_header_flag: u64,
    pub nbr_32_byte_trace_header_extension: u64,
    pub vertical_stack_size: u64,
    pub ru_channel_number: u64,
    pub array_forming: u64,
}

impl ChannelSetDescriptor {
    pub fn to_detail_map(&self) -> HeaderValue {
        header_map! {
            "scan_type_number" => self.scan_type_number,
            "channel_set_number" => self.channel_set_number,
            "channel_set_start_time" => self.channel_set_start_time,
            "channel_set_end_time" => self.channel_set_end_time,
            "optional_mp_factor" => self.optional_mp_factor,
            "mp_factor_descaler_multiplier" => self.mp_factor_descaler_multiplier,
            "nbr_channels_in_channel_set" => self.nbr_channels_in_channel_set,
            "channel_type_code" => self.channel_type_code,
            "nbr_sub_scans" => self.nbr_sub_scans,
            "gain_control_type" => self.gain_control_type,
            "alias_filter_frequency" => self.alias_filter_frequency,
            "alias_filter_slope" => self.alias_filter_slope,
            "low_cut_filter_freq" => self.low_cut_filter_freq,
            "low_cut_filter_slope" => self.low_cut_filter_slope,
            "notch_filter_freq" => self.notch_filter_freq,
            "notch_2_filter_freq" => self.notch_2_filter_freq,
            "notch_3_filter_freq" => self.notch_3_filter_freq,
            "extended_channel_set_number" => self.extended_channel_set_number,
            "extended_header_flag" => self.extended_header_flag,
            "nbr_32_byte_trace_header_extension" => self.nbr_32_byte_trace_header_extension,
            "vertical_stack_size" => self.vertical_stack_size,
            "ru_channel_number" => self.ru_channel_number,
            "array_forming" => self.array_forming,
        }
    }
}

/// Extended header block 1, fixed layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtendedHeader1 {
    pub id_ru: u64,
    /// Seconds since the Unix epoch.
    pub deployment_time: f64,
    /// Seconds since the Unix epoch.
    pub pick_up_time: f64,
    /// Seconds since the Unix epoch.
    pub start_time_ru: f64,
}

impl ExtendedHeader1 {
    pub fn to_detail_map(&self) -> HeaderValue {
        let mut map = BTreeMap::new();
        map.insert("id_ru".to_string(), HeaderValue::UInt(self.id_ru));
        map.insert(
            "deployment_time".to_string(),
            HeaderValue::Timestamp(self.deployment_time),
        );
        map.insert(
            "pick_up_time".to_string(),
            HeaderValue::Timestamp(self.pick_up_time),
        );
        map.insert(
            "start_time_ru".to_string(),
            HeaderValue::Timestamp(self.start_time_ru),
        );
        HeaderValue::Map(map)
    }
}

/// Extended header block 2, fixed layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtendedHeader2 {
    /// Seconds.
    pub acquisition_drift_window: f64,
    /// Seconds.
    pub clock_drift: f64,
    pub clock_stop_method: ClockStopMethod,
    pub frequency_drift: FrequencyDriftFlag,
    pub oscillator_type: OscillatorType,
    pub data_collection_method: DataCollectionMethod,
    pub nbr_time_slices: u64,
    pub nbr_files: u64,
    pub file_number: u64,
    pub data_decimation: DataDecimationFlag,
    pub original_base_scan_interval: u64,
    pub number_decimation_filter_coefficient: u64,
}

impl ExtendedHeader2 {
    pub fn to_detail_map(&self) -> HeaderValue {
        header_map! {
            "acquisition_drift_window" => self.acquisition_drift_window,
            "clock_drift" => self.clock_drift,
            "clock_stop_method" => format!("{:?}", self.clock_stop_method),
            "frequency_drift" => format!("{:?}", self.frequency_drift),
            "oscillator_type" => format!("{:?}", self.oscillator_type),
            "data_collection_method" => format!("{:?}", self.data_collection_method),
            "nbr_time_slices" => self.nbr_time_slices,
            "nbr_files" => self.nbr_files,
            "file_number" => self.file_number,
            "data_decimation" => format!("{:?}", self.data_decimation),
            "original_base_scan_interval" => self.original_base_scan_interval,
            "number_decimation_filter_coefficient" => self.number_decimation_filter_coefficient,
        }
    }
}

/// Extended header block 3, fixed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtendedHeader3 {
    pub receiver_line_number: u64,
    pub receiver_point: u64,
    pub receiver_point_index: u64,
    pub first_shot_line: u64,
    pub first_shot_point: u64,
    pub first_shot_point_index: u64,
    pub last_shot_line: u64,
    pub last_shot_point: u64,
    pub last_shot_point_index: u64,
}

impl ExtendedHeader3 {
    pub fn to_detail_map(&self) -> HeaderValue {
        header_map! {
            "receiver_line_number" => self.receiver_line_number,
            "receiver_point" => self.receiver_point,
            "receiver_point_index" => self.receiver_point_index,
            "first_shot_line" => self.first_shot_line,
            "first_shot_point" => self.first_shot_point,
            "first_shot_point_index" => self.first_shot_point_index,
            "last_shot_line" => self.last_shot_line,
            "last_shot_point" => self.last_shot_point,
            "last_shot_point_index" => self.last_shot_point_index,
        }
    }
}

/// A decimation-coefficient tail block (extended header block 4..N). Every
/// block but the last holds 8 coefficients; the last holds
/// `number_decimation_filter_coefficient % 8`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimationCoefficientsBlock {
    /// 1-based extended header block number (4, 5, ...).
    pub block_number: u64,
    pub coefficients: Vec<f32>,
}

impl DecimationCoefficientsBlock {
    pub fn to_detail_map(&self) -> HeaderValue {
        let mut map = BTreeMap::new();
        for (i, coeff) in self.coefficients.iter().enumerate() {
            map.insert(format!("coeff_{}", i + 1), HeaderValue::from(*coeff));
        }
        HeaderValue::Map(map)
    }
}

/// All extended headers: the three fixed blocks plus any decimation tail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtendedHeaders {
    pub header_1: ExtendedHeader1,
    pub header_2: ExtendedHeader2,
    pub header_3: ExtendedHeader3,
    pub decimation_blocks: Vec<DecimationCoefficientsBlock>,
}

impl ExtendedHeaders {
    pub fn to_detail_map(&self) -> HeaderValue {
        let mut map = BTreeMap::new();
        map.insert("1".to_string(), self.header_1.to_detail_map());
        map.insert("2".to_string(), self.header_2.to_detail_map());
        map.insert("3".to_string(), self.header_3.to_detail_map());
        for block in &self.decimation_blocks {
            map.insert(block.block_number.to_string(), block.to_detail_map());
        }
        HeaderValue::Map(map)
    }
}

/// The four top-level initial-header records, keyed the same way
/// `read_initial_headers` returns them on its own.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InitialHeaders {
    pub general_header_1: GeneralHeader1,
    pub general_header_2: GeneralHeader2,
    /// 1-based channel-set number to its descriptor.
    pub channel_sets_descriptor: Vec<ChannelSetDescriptor>,
    pub extended_headers: ExtendedHeaders,
}

impl InitialHeaders {
    pub fn to_detail_map(&self) -> HeaderValue {
        let mut channel_sets = BTreeMap::new();
        for (i, cs) in self.channel_sets_descriptor.iter().enumerate() {
            channel_sets.insert((i + 1).to_string(), cs.to_detail_map());
        }
        header_map! {
            "general_header_1" => self.general_header_1.to_detail_map(),
            "general_header_2" => self.general_header_2.to_detail_map(),
            "channel_sets_descriptor" => HeaderValue::Map(channel_sets),
            "extended_headers" => self.extended_headers.to_detail_map(),
        }
    }
}
