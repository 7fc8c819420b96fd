//! This module contains the [`ReadOptions`] structure used to customize how
//! `read_rg16` walks a file's trace blocks.
use crate::UtcDateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling a single `read_rg16` call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadOptions {
    /// If true, skip reading sample data; only trace headers are populated.
    pub headonly: bool,
    /// Traces starting before this time are skipped. Defaults to the Unix
    /// epoch.
    pub starttime: UtcDateTime,
    /// Traces starting at or after this time are skipped. Defaults to
    /// [`UtcDateTime::INFINITY`] rather than the local wall clock, so that
    /// default options are deterministic.
    pub endtime: UtcDateTime,
    /// If true, merge contiguous same-channel trace blocks after decoding.
    pub merge: bool,
    /// If true, remap component codes to Z/N/E and negate the Z component.
    pub contacts_north: bool,
    /// If true, attach the initial headers and trace extension blocks to
    /// every decoded trace.
    pub details: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            headonly: false,
            starttime: UtcDateTime::from_posix_seconds(0.0),
            endtime: UtcDateTime::INFINITY,
            merge: false,
            contacts_north: false,
            details: false,
        }
    }
}

impl ReadOptions {
    pub fn with_headonly(mut self, headonly: bool) -> Self {
        self.headonly = headonly;
        self
    }

    pub fn with_starttime(mut self, starttime: UtcDateTime) -> Self {
        self.starttime = starttime;
        self
    }

    pub fn with_endtime(mut self, endtime: UtcDateTime) -> Self {
        self.endtime = endtime;
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    pub fn with_contacts_north(mut self, contacts_north: bool) -> Self {
        self.contacts_north = contacts_north;
        self
    }

    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    #[cfg(feature = "to_json")]
    pub fn to_json(&self) -> Result<String, crate::errors::Rg16Error> {
        serde_json::to_string(self).map_err(crate::errors::Rg16Error::SerdeError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endtime_is_infinity_not_wall_clock() {
        let opts = ReadOptions::default();
        assert_eq!(opts.endtime, UtcDateTime::INFINITY);
        assert_eq!(opts.starttime.timestamp(), 0.0);
    }

    #[test]
    fn builder_chains() {
        let opts = ReadOptions::default().with_merge(true).with_details(true);
        assert!(opts.merge);
        assert!(opts.details);
        assert!(!opts.headonly);
    }
}
