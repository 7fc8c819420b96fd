//! The cheap format probe: does this source look like an RG16 file?
use rg16_core::field_reader::{read_bcd, read_binary, FieldWidth};
use rg16_core::ByteSource;

/// Format identity constants (spec.md §1/§4.2): a source is RG16 only if
/// all three match.
const EXPECT_SAMPLE_FORMAT_CODE: u64 = 8058;
const EXPECT_MANUFACTURER_CODE: u64 = 20;
const EXPECT_VERSION: u64 = 262;

/// Returns true if `source` looks like an RG16 v1.6-1 file. Any read
/// failure (too short to hold the three probed fields, or an I/O error on
/// a mapped file) is treated as "not RG16", not propagated.
pub fn is_rg16(source: &impl ByteSource) -> bool {
    let sample_format = match read_bcd(source, 2, FieldWidth::Bytes(2), true) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let manufacturer_code = match read_bcd(source, 16, FieldWidth::Bytes(1), true) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let version = match read_binary(source, 42, FieldWidth::Bytes(2), true) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let matches = sample_format == EXPECT_SAMPLE_FORMAT_CODE
        && manufacturer_code == EXPECT_MANUFACTURER_CODE
        && version == EXPECT_VERSION;
    if !matches {
        log::debug!(
            "not RG16: sample_format={} manufacturer_code={} version={}",
            sample_format,
            manufacturer_code,
            version
        );
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_initial_header_prefix() -> Vec<u8> {
        let mut buf = vec![0u8; 64];
        buf[2] = 0x80;
        buf[3] = 0x58;
        buf[16] = 0x20;
        buf[42] = 0x01;
        buf[43] = 0x06;
        buf
    }

    #[test]
    fn recognizes_valid_prefix() {
        assert!(is_rg16(&valid_initial_header_prefix()));
    }

    #[test]
    fn rejects_wrong_manufacturer() {
        let mut buf = valid_initial_header_prefix();
        buf[16] = 0x21;
        assert!(!is_rg16(&buf));
    }

    #[test]
    fn rejects_truncated_source() {
        assert!(!is_rg16(&vec![0u8; 10]));
    }
}
