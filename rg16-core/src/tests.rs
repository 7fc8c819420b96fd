mod header_detail_maps {
    use crate::headers::{ChannelSetDescriptor, GeneralHeader1, HeaderValue};

    fn sample_general_header_1() -> GeneralHeader1 {
        GeneralHeader1 {
            file_number: 1,
            sample_format_code: 8058,
            general_constant: 0,
            time_slice_year: 24,
            nbr_add_general_header: 0,
            julian_day: 42,
            time_slice: 0,
            manufacturer_code: 20,
            manufacturer_serial_number: 1,
            base_scan_interval: 16,
            polarity_code: 0,
            record_type: 8,
            scan_type_per_record: 1,
            nbr_channel_set: 1,
            nbr_skew_block: 0,
        }
    }

    #[test]
    fn general_header_1_detail_map_round_trips_field_names() {
        let header = sample_general_header_1();
        match header.to_detail_map() {
            HeaderValue::Map(map) => {
                assert_eq!(map.get("sample_format_code"), Some(&HeaderValue::UInt(8058)));
                assert_eq!(map.get("manufacturer_code"), Some(&HeaderValue::UInt(20)));
                assert_eq!(map.len(), 15);
            }
            other => panic!("expected Map, got {:?}", other),
        }
    }

    #[test]
    fn channel_set_descriptor_detail_map_keeps_float_fields() {
        let cs = ChannelSetDescriptor {
            scan_type_number: 1,
            channel_set_number: 1,
            channel_set_start_time: 0.0,
            channel_set_end_time: 2.0,
            optional_mp_factor: 0,
            mp_factor_descaler_multiplier: 1,
            nbr_channels_in_channel_set: 3,
            channel_type_code: 1,
            nbr_sub_scans: 1,
            gain_control_type: 0,
            alias_filter_frequency: 0,
            alias_filter_slope: 0,
            low_cut_filter_freq: 0,
            low_cut_filter_slope: 0,
            notch_filter_freq: 50.0,
            notch_2_filter_freq: 0.0,
            notch_3_filter_freq: 0.0,
            extended_channel_set_number: 1,
            extended_header_flag: 0,
            nbr_32_byte_trace_header_extension: 10,
            vertical_stack_size: 1,
            ru_channel_number: 1,
            array_forming: 0,
        };
        match cs.to_detail_map() {
            HeaderValue::Map(map) => {
                assert_eq!(
                    map.get("notch_filter_freq"),
                    Some(&HeaderValue::Float(50.0))
                );
            }
            other => panic!("expected Map, got {:?}", other),
        }
    }
}

mod trace_details {
    use crate::headers::HeaderValue;
    use crate::trace_header::{TraceDetails, TraceExtensionBlock10};

    #[test]
    fn absent_blocks_are_not_in_the_detail_map() {
        let details = TraceDetails {
            trace_number: 7,
            trace_edit_code: 0,
            ..Default::default()
        };
        match details.to_detail_map() {
            HeaderValue::Map(map) => {
                assert_eq!(map.get("trace_number"), Some(&HeaderValue::UInt(7)));
                assert!(!map.contains_key("test_signal_generator_idle_level"));
            }
            other => panic!("expected Map, got {:?}", other),
        }
    }

    #[test]
    fn present_block_10_is_rendered() {
        let details = TraceDetails {
            block_10: Some(TraceExtensionBlock10 {
                test_signal_generator_idle_level: 1,
                test_signal_generator_active_level: 2,
                test_signal_generator_pattern_1: 3,
                test_signal_generator_pattern_2: 4,
            }),
            ..Default::default()
        };
        match details.to_detail_map() {
            HeaderValue::Map(map) => {
                assert_eq!(
                    map.get("test_signal_generator_pattern_2"),
                    Some(&HeaderValue::UInt(4))
                );
            }
            other => panic!("expected Map, got {:?}", other),
        }
    }
}
