//! Strictness configuration for the species chains.

use pid_core::{Result, Strictness};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Strictness levels used by chain evaluation.
///
/// Defaults are the nominal analysis choices: medium vertex window, loose
/// PCAL fiducial, medium PCAL deposit floor and loose photon fiducial.
///
/// ```
/// use pid_cuts::CutConfig;
/// use pid_core::Strictness;
///
/// let cfg = CutConfig::from_json(r#"{"vertex": "tight"}"#).unwrap();
/// assert_eq!(cfg.vertex, Strictness::Tight);
/// assert_eq!(cfg.eieo, Strictness::Medium);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CutConfig {
    /// Electron vertex-z window.
    pub vertex: Strictness,
    /// Electron PCAL lv/lw minima.
    pub pcal_fiducial: Strictness,
    /// Electron minimum PCAL deposit.
    pub eieo: Strictness,
    /// Photon PCAL lv/lw minima.
    pub photon_fiducial: Strictness,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            vertex: Strictness::Medium,
            pcal_fiducial: Strictness::Loose,
            eieo: Strictness::Medium,
            photon_fiducial: Strictness::Loose,
        }
    }
}

impl CutConfig {
    /// Parse from a JSON object. Omitted fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Set every level at once.
    pub fn uniform(level: Strictness) -> Self {
        Self { vertex: level, pcal_fiducial: level, eieo: level, photon_fiducial: level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(CutConfig::from_json("{}").unwrap(), CutConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CutConfig::from_json(r#"{"sampling": "tight"}"#).unwrap_err();
        assert!(matches!(err, pid_core::Error::Json(_)));
    }

    #[test]
    fn test_bad_level_rejected() {
        assert!(CutConfig::from_json(r#"{"vertex": "extreme"}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CutConfig::from_path("/nonexistent/pid-cuts.json").unwrap_err();
        assert!(matches!(err, pid_core::Error::Io(_)));
    }

    #[test]
    fn test_uniform_round_trip() {
        let cfg = CutConfig::uniform(Strictness::Tight);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(CutConfig::from_json(&json).unwrap(), cfg);
    }
}
