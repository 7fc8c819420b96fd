//! Enumerated fields used in the RG16 initial and trace headers.
//!
//! Every enum here is read with a strict `new` constructor: an unrecognised
//! code is an [`Rg16Error::UnknownEnumCode`], never a silently substituted
//! default. This is stricter than the original `obspy.io.rg16` reader (which
//! raises on a bare dict lookup miss for the same tables) but the stricter
//! behaviour is deliberate — see `SPEC_FULL.md` §6.
use num::FromPrimitive;
use num_derive::{FromPrimitive, ToPrimitive};
#[cfg(any(feature = "to_json", feature = "serde"))]
use serde::{Deserialize, Serialize};

use crate::errors::Rg16Error;

/// Extended header 2, byte 12: how the remote unit's clock stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum ClockStopMethod {
    Normal = 0,
    StorageFull = 1,
    PowerLoss = 2,
    Reboot = 3,
}

impl ClockStopMethod {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "clock_stop_method",
            code,
        })
    }
}

/// Extended header 2, byte 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum FrequencyDriftFlag {
    NotWithinSpecification = 0,
    WithinSpecification = 1,
}

impl FrequencyDriftFlag {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "frequency_drift",
            code,
        })
    }
}

/// Extended header 2, byte 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum OscillatorType {
    ControlBoard = 0,
    Atomic = 1,
    Ovenized = 2,
    DoubleOvenized = 3,
    Disciplined = 4,
}

impl OscillatorType {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "oscillator_type",
            code,
        })
    }
}

/// Extended header 2, byte 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum DataCollectionMethod {
    Normal = 0,
    Continuous = 1,
    ShotSlicedWithGuardBand = 2,
}

impl DataCollectionMethod {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "data_collection_method",
            code,
        })
    }
}

/// Extended header 2, byte 28: whether the file's samples were decimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum DataDecimationFlag {
    NotDecimated = 0,
    Decimated = 1,
}

impl DataDecimationFlag {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "data_decimation",
            code,
        })
    }
}

/// Trace extension block 2, byte +29: provenance of the shot-point info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum SourceOfFinalShotInfo {
    Undefined = 0,
    Preplan = 1,
    AsShot = 2,
    PostProcessed = 3,
}

impl SourceOfFinalShotInfo {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "source_of_final_shot_info",
            code,
        })
    }
}

/// Trace extension block 2, byte +30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum EnergySourceType {
    Undefined = 0,
    Vibroseis = 1,
    Dynamite = 2,
    AirGun = 3,
}

impl EnergySourceType {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "energy_source_type",
            code,
        })
    }
}

/// Trace extension block 4, byte +9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum TraceClippedFlag {
    NotClipped = 0,
    DigitalClipDetected = 1,
    AnalogClipDetected = 2,
}

impl TraceClippedFlag {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "trace_clipped_flag",
            code,
        })
    }
}

/// Trace extension block 4, byte +10. Values are 2 and 8, not contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum RecordTypeCode {
    TestDataRecord = 2,
    NormalSeismicDataRecord = 8,
}

impl RecordTypeCode {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "record_type_code",
            code,
        })
    }
}

/// Trace extension block 4, byte +11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum ShotStatusFlag {
    Normal = 0,
    BadOperatorSpecified = 1,
    BadFailedQcTest = 2,
}

impl ShotStatusFlag {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "shot_status_flag",
            code,
        })
    }
}

/// Trace extension block 5, byte +29.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum SourceOfFinalReceiverInfo {
    Preplan = 1,
    AsLaidNoNavigationSensor = 2,
    AsLaidHipapOnly = 3,
    AsLaidHipapAndIns = 4,
    AsLaidHipapAndDvl = 5,
    AsLaidHipapDvlAndIns = 6,
    PostProcessedHipapOnly = 7,
    PostProcessedHipapAndIns = 8,
    PostProcessedHipapAndDvl = 9,
    PostProcessedHipapDvlAndIns = 10,
    FirstBreakAnalysis = 11,
}

impl SourceOfFinalReceiverInfo {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "source_of_final_receiver_info",
            code,
        })
    }
}

/// Trace extension block 8, byte +24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum PreampPath {
    ExternalInputSelected = 0,
    SimulatedDataSelected = 1,
    PreAmpInputShortedToGround = 2,
    TestOscillatorWithSensors = 3,
    TestOscillatorWithoutSensors = 4,
    CommonModeTestOscillatorWithSensors = 5,
    CommonModeTestOscillatorWithoutSensors = 6,
    TestOscillatorOnPositiveSensorsNegGrounded = 7,
    TestOscillatorOnNegativeSensorsPosGrounded = 8,
    TestOscillatorOnPositivePaInputNegGrounded = 9,
    TestOscillatorOnNegativePaInputPosGrounded = 10,
    TestOscillatorOnPositivePaInputNegGroundedNoSensors = 11,
    TestOscillatorOnNegativePaInputPosGroundedNoSensors = 12,
}

impl PreampPath {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "preamp_path",
            code,
        })
    }
}

/// Trace extension block 8, byte +28.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum TestOscillatorSignal {
    TestOscillatorPathOpen = 0,
    TestSignalSelected = 1,
    DcReferenceSelected = 2,
    TestOscillatorPathGrounded = 3,
    DcReferenceToggleSelected = 4,
}

impl TestOscillatorSignal {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "test_oscillator_signal_type",
            code,
        })
    }
}

/// Trace extension block 9, byte +0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum TestSignalType {
    PatternIsAddressRamp = 0,
    PatternIsRuAddressRamp = 1,
    PatternIsBuiltFromProvidedValues = 2,
    PatternIsRandomNumbers = 3,
    PatternIsWalkingOnes = 4,
    PatternIsWalkingZeros = 5,
    SpecifiedDcValue = 6,
    PulseTrainWithSpecifiedDutyCycle = 7,
    SineWave = 8,
    DualToneSine = 9,
    Impulse = 10,
    StepFunction = 11,
}

impl TestSignalType {
    pub fn new(code: u64) -> Result<Self, Rg16Error> {
        Self::from_u64(code).ok_or(Rg16Error::UnknownEnumCode {
            field: "test_signal_generator_signal_type",
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_stop_method_strict() {
        assert_eq!(ClockStopMethod::new(0).unwrap(), ClockStopMethod::Normal);
        assert_eq!(ClockStopMethod::new(3).unwrap(), ClockStopMethod::Reboot);
        assert!(matches!(
            ClockStopMethod::new(4),
            Err(Rg16Error::UnknownEnumCode {
                field: "clock_stop_method",
                code: 4
            })
        ));
    }

    #[test]
    fn record_type_code_noncontiguous() {
        assert_eq!(
            RecordTypeCode::new(2).unwrap(),
            RecordTypeCode::TestDataRecord
        );
        assert_eq!(
            RecordTypeCode::new(8).unwrap(),
            RecordTypeCode::NormalSeismicDataRecord
        );
        assert!(RecordTypeCode::new(0).is_err());
    }

    #[test]
    fn source_of_final_receiver_info_range() {
        assert!(SourceOfFinalReceiverInfo::new(1).is_ok());
        assert!(SourceOfFinalReceiverInfo::new(11).is_ok());
        assert!(SourceOfFinalReceiverInfo::new(0).is_err());
        assert!(SourceOfFinalReceiverInfo::new(12).is_err());
    }
}
