//! Common data types shared by the cut engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Torus magnetic field configuration of a run.
///
/// Selects which calibration tables the predicates read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Negative particles bend toward the beam line.
    #[default]
    Inbending,
    /// Negative particles bend away from the beam line.
    Outbending,
}

impl Polarity {
    /// Convenience constructor from the common `isinbending` flag.
    pub fn from_inbending(inbending: bool) -> Self {
        if inbending { Polarity::Inbending } else { Polarity::Outbending }
    }

    /// Row index into polarity-keyed tables (inbending = 0).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Polarity::Inbending => 0,
            Polarity::Outbending => 1,
        }
    }
}

/// Cut strength for predicates with adjustable bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Widest acceptance.
    Loose,
    /// Nominal acceptance.
    #[default]
    Medium,
    /// Narrowest acceptance.
    Tight,
}

impl Strictness {
    /// All levels, loosest first.
    pub const ALL: [Strictness; 3] = [Strictness::Loose, Strictness::Medium, Strictness::Tight];

    /// Row index into strictness-keyed tables (loose = 0).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Strictness::Loose => 0,
            Strictness::Medium => 1,
            Strictness::Tight => 2,
        }
    }
}

/// Particle species hypotheses with a cut chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// e-
    Electron,
    /// p
    Proton,
    /// K+ or K-
    Kaon,
    /// gamma
    Photon,
}

impl Species {
    /// All species with a cut chain.
    pub const ALL: [Species; 4] = [Species::Electron, Species::Proton, Species::Kaon, Species::Photon];

    /// Rest mass in GeV.
    pub fn mass(self) -> f64 {
        match self {
            Species::Electron => 0.000511,
            Species::Proton => 0.938272,
            Species::Kaon => 0.493677,
            Species::Photon => 0.0,
        }
    }

    /// Lower-case name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Species::Electron => "electron",
            Species::Proton => "proton",
            Species::Kaon => "kaon",
            Species::Photon => "photon",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimal four-momentum `(px, py, pz, E)` in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorentzVector {
    /// x momentum component
    pub px: f64,
    /// y momentum component
    pub py: f64,
    /// z momentum component
    pub pz: f64,
    /// Energy
    pub e: f64,
}

impl LorentzVector {
    /// Build a vector from three-momentum and rest mass (`E = sqrt(p² + m²)`).
    pub fn from_momentum_mass(px: f64, py: f64, pz: f64, mass: f64) -> Self {
        let e = (px * px + py * py + pz * pz + mass * mass).sqrt();
        Self { px, py, pz, e }
    }

    /// Three-momentum magnitude.
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Invariant mass. Space-like vectors return the negative root.
    pub fn mass(&self) -> f64 {
        let m2 = self.e * self.e - self.p() * self.p();
        if m2 >= 0.0 { m2.sqrt() } else { -(-m2).sqrt() }
    }
}

impl std::ops::Add for LorentzVector {
    type Output = LorentzVector;

    fn add(self, rhs: LorentzVector) -> LorentzVector {
        LorentzVector {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lorentz_vector_mass() {
        let v = LorentzVector::from_momentum_mass(0.3, -0.4, 2.0, Species::Proton.mass());
        assert_relative_eq!(v.mass(), 0.938272, epsilon = 1e-9);
        assert_relative_eq!(v.p(), (0.09f64 + 0.16 + 4.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_photon_is_massless() {
        let v = LorentzVector::from_momentum_mass(1.0, 0.0, 0.0, Species::Photon.mass());
        assert_relative_eq!(v.e, 1.0);
        assert_relative_eq!(v.mass(), 0.0);
    }

    #[test]
    fn test_pair_invariant_mass() {
        let a = LorentzVector::from_momentum_mass(1.0, 0.0, 0.0, 0.0);
        let b = LorentzVector::from_momentum_mass(-1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!((a + b).mass(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_table_indices() {
        assert_eq!(Polarity::Inbending.index(), 0);
        assert_eq!(Polarity::from_inbending(false), Polarity::Outbending);
        let idx: Vec<usize> = Strictness::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_polarity_serde_names() {
        let p: Polarity = serde_json::from_str("\"outbending\"").unwrap();
        assert_eq!(p, Polarity::Outbending);
        assert_eq!(serde_json::to_string(&Strictness::Tight).unwrap(), "\"tight\"");
    }
}
