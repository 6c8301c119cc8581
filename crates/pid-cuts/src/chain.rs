//! Species cut chains.
//!
//! Each species has an ordered cut enumeration. Every cut maps to a
//! [`CutFn`] that pulls its inputs from the [`Candidate`] and delegates the
//! numeric test to [`crate::cuts`]. A cut whose inputs are missing rejects.
//!
//! Chains are evaluated as a short-circuit AND in request order:
//!
//! ```
//! use pid_cuts::{Candidate, CutConfig, ElectronCut, passes};
//!
//! let c = Candidate::builder(0).pid(Some(11)).charge(Some(-1)).build();
//! let cfg = CutConfig::default();
//! assert!(passes(&c, &[ElectronCut::Pid, ElectronCut::Charge], &cfg));
//! assert!(!passes(&c, &[ElectronCut::Pid, ElectronCut::Vertex], &cfg));
//! assert!(passes::<ElectronCut>(&c, &[], &cfg));
//! ```

use pid_core::{Error, Polarity, Result, Species, Strictness};
use std::fmt;
use std::str::FromStr;

use crate::candidate::Candidate;
use crate::config::CutConfig;
use crate::cuts;
use crate::geometry::DcRegion;
use crate::tables::ANTI_PION_MIN_P;

/// Predicate bound to one cut of a chain.
pub type CutFn = fn(&Candidate, &CutConfig) -> bool;

/// Cut identifiers of one species chain.
pub trait SpeciesCut: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Species this chain identifies.
    const SPECIES: Species;

    /// Every cut in chain order. The default selection.
    const ALL: &'static [Self];

    /// Stable upper-snake name.
    fn name(self) -> &'static str;

    /// Predicate implementing this cut.
    fn predicate(self) -> CutFn;

    /// Look a cut up by [`SpeciesCut::name`].
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

macro_rules! impl_cut_traits {
    ($t:ty) => {
        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $t {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                <$t>::from_name(s).ok_or_else(|| Error::UnknownCut {
                    species: <$t as SpeciesCut>::SPECIES,
                    name: s.to_string(),
                })
            }
        }
    };
}

// ── Shared field access ────────────────────────────────────────

fn has_pid(c: &Candidate, code: i32) -> bool {
    c.pid() == Some(code)
}

fn forward(c: &Candidate, _: &CutConfig) -> bool {
    c.status().is_some_and(cuts::forward_detector)
}

fn pcal_fiducial_at(c: &Candidate, level: Strictness) -> bool {
    match (c.pcal_sector(), c.pcal_lv(), c.pcal_lw()) {
        (Some(s), Some(lv), Some(lw)) => cuts::pcal_fiducial(s, lv, lw, c.polarity(), level),
        _ => false,
    }
}

/// Electron DC fiducial: XY lines when inbending, θ–φ fits when outbending.
fn electron_dc(c: &Candidate, region: DcRegion) -> bool {
    let Some(sector) = c.dc_sector() else {
        return false;
    };
    let point = c.dc_point(region);
    match c.polarity() {
        Polarity::Inbending => {
            point.xy().is_some_and(|(x, y)| cuts::dc_fiducial_xy(sector, region, x, y))
        }
        Polarity::Outbending => point
            .xyz()
            .is_some_and(|(x, y, z)| cuts::dc_fiducial_theta_phi(sector, region, x, y, z)),
    }
}

/// Hadron DC fiducial: θ–φ fits when inbending, XY lines when outbending.
/// The full point is required either way.
fn hadron_dc(c: &Candidate, region: DcRegion) -> bool {
    let (Some(sector), Some((x, y, z))) = (c.dc_sector(), c.dc_point(region).xyz()) else {
        return false;
    };
    match c.polarity() {
        Polarity::Inbending => cuts::dc_fiducial_theta_phi(sector, region, x, y, z),
        Polarity::Outbending => cuts::dc_fiducial_xy(sector, region, x, y),
    }
}

fn hadron_chi2pid(c: &Candidate, _: &CutConfig) -> bool {
    match (c.chi2pid(), c.p(), c.pid()) {
        (Some(chi2), Some(p), Some(pid)) => cuts::chi2pid_window(chi2, p, pid),
        _ => false,
    }
}

fn hadron_delta_vz(c: &Candidate, _: &CutConfig) -> bool {
    c.dvz().is_some_and(|dvz| cuts::delta_vz_window(dvz, c.polarity()))
}

// ── Electron ───────────────────────────────────────────────────

/// Electron cuts in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectronCut {
    /// Trigger particle (negative status).
    Status,
    /// Negative charge.
    Charge,
    /// Reconstructed PID is 11.
    Pid,
    /// Vertex z window.
    Vertex,
    /// PCAL lv/lw edges.
    PcalFiducial,
    /// PCAL vs ECin pion rejection above 4.5 GeV.
    AntiPion,
    /// Minimum PCAL deposit.
    Eieo,
    /// Sampling-fraction band.
    Sampling,
    /// DC region 1 fiducial.
    DcFiducialRegion1,
    /// DC region 2 fiducial.
    DcFiducialRegion2,
    /// DC region 3 fiducial.
    DcFiducialRegion3,
}

fn electron_status(c: &Candidate, _: &CutConfig) -> bool {
    c.status().is_some_and(cuts::trigger_status)
}

fn electron_charge(c: &Candidate, _: &CutConfig) -> bool {
    c.charge().is_some_and(cuts::negative_charge)
}

fn electron_pid(c: &Candidate, _: &CutConfig) -> bool {
    has_pid(c, 11)
}

fn electron_vertex(c: &Candidate, cfg: &CutConfig) -> bool {
    c.vz().is_some_and(|vz| cuts::vertex_window(vz, c.polarity(), cfg.vertex))
}

fn electron_pcal_fiducial(c: &Candidate, cfg: &CutConfig) -> bool {
    pcal_fiducial_at(c, cfg.pcal_fiducial)
}

fn electron_anti_pion(c: &Candidate, _: &CutConfig) -> bool {
    let Some(p) = c.p() else {
        return false;
    };
    match c.pcal_energy() {
        Some(pcal) => cuts::anti_pion(p, pcal, c.ecin_energy()),
        // Nothing to test below threshold.
        None => p < ANTI_PION_MIN_P,
    }
}

fn electron_eieo(c: &Candidate, cfg: &CutConfig) -> bool {
    c.pcal_energy().is_some_and(|e| cuts::eieo(e, cfg.eieo))
}

fn electron_sampling(c: &Candidate, _: &CutConfig) -> bool {
    match (c.p(), c.pcal_sector(), c.pcal_energy()) {
        (Some(p), Some(s), Some(pcal)) => {
            cuts::sampling_fraction(p, s, pcal, c.ecin_energy(), c.ecout_energy())
        }
        _ => false,
    }
}

impl SpeciesCut for ElectronCut {
    const SPECIES: Species = Species::Electron;

    const ALL: &'static [Self] = &[
        ElectronCut::Status,
        ElectronCut::Charge,
        ElectronCut::Pid,
        ElectronCut::Vertex,
        ElectronCut::PcalFiducial,
        ElectronCut::AntiPion,
        ElectronCut::Eieo,
        ElectronCut::Sampling,
        ElectronCut::DcFiducialRegion1,
        ElectronCut::DcFiducialRegion2,
        ElectronCut::DcFiducialRegion3,
    ];

    fn name(self) -> &'static str {
        match self {
            ElectronCut::Status => "STATUS",
            ElectronCut::Charge => "CHARGE",
            ElectronCut::Pid => "PID",
            ElectronCut::Vertex => "VERTEX",
            ElectronCut::PcalFiducial => "PCAL_FIDUCIAL",
            ElectronCut::AntiPion => "ANTI_PION",
            ElectronCut::Eieo => "EIEO",
            ElectronCut::Sampling => "SAMPLING",
            ElectronCut::DcFiducialRegion1 => "DC_FIDUCIAL_REG1",
            ElectronCut::DcFiducialRegion2 => "DC_FIDUCIAL_REG2",
            ElectronCut::DcFiducialRegion3 => "DC_FIDUCIAL_REG3",
        }
    }

    fn predicate(self) -> CutFn {
        match self {
            ElectronCut::Status => electron_status,
            ElectronCut::Charge => electron_charge,
            ElectronCut::Pid => electron_pid,
            ElectronCut::Vertex => electron_vertex,
            ElectronCut::PcalFiducial => electron_pcal_fiducial,
            ElectronCut::AntiPion => electron_anti_pion,
            ElectronCut::Eieo => electron_eieo,
            ElectronCut::Sampling => electron_sampling,
            ElectronCut::DcFiducialRegion1 => |c, _| electron_dc(c, DcRegion::R1),
            ElectronCut::DcFiducialRegion2 => |c, _| electron_dc(c, DcRegion::R2),
            ElectronCut::DcFiducialRegion3 => |c, _| electron_dc(c, DcRegion::R3),
        }
    }
}

impl_cut_traits!(ElectronCut);

// ── Proton ─────────────────────────────────────────────────────

/// Proton cuts in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtonCut {
    /// Reconstructed PID is 2212.
    Pid,
    /// DC region 1 fiducial.
    DcFiducialRegion1,
    /// DC region 2 fiducial.
    DcFiducialRegion2,
    /// DC region 3 fiducial.
    DcFiducialRegion3,
    /// Vertex difference to the trigger particle.
    DeltaVz,
    /// Forward-detector track.
    Forward,
    /// chi2pid window.
    Chi2pid,
}

impl SpeciesCut for ProtonCut {
    const SPECIES: Species = Species::Proton;

    const ALL: &'static [Self] = &[
        ProtonCut::Pid,
        ProtonCut::DcFiducialRegion1,
        ProtonCut::DcFiducialRegion2,
        ProtonCut::DcFiducialRegion3,
        ProtonCut::DeltaVz,
        ProtonCut::Forward,
        ProtonCut::Chi2pid,
    ];

    fn name(self) -> &'static str {
        match self {
            ProtonCut::Pid => "PID",
            ProtonCut::DcFiducialRegion1 => "DC_FIDUCIAL_REG1",
            ProtonCut::DcFiducialRegion2 => "DC_FIDUCIAL_REG2",
            ProtonCut::DcFiducialRegion3 => "DC_FIDUCIAL_REG3",
            ProtonCut::DeltaVz => "DELTA_VZ",
            ProtonCut::Forward => "FORWARD",
            ProtonCut::Chi2pid => "CHI2PID",
        }
    }

    fn predicate(self) -> CutFn {
        match self {
            ProtonCut::Pid => |c, _| has_pid(c, 2212),
            ProtonCut::DcFiducialRegion1 => |c, _| hadron_dc(c, DcRegion::R1),
            ProtonCut::DcFiducialRegion2 => |c, _| hadron_dc(c, DcRegion::R2),
            ProtonCut::DcFiducialRegion3 => |c, _| hadron_dc(c, DcRegion::R3),
            ProtonCut::DeltaVz => hadron_delta_vz,
            ProtonCut::Forward => forward,
            ProtonCut::Chi2pid => hadron_chi2pid,
        }
    }
}

impl_cut_traits!(ProtonCut);

// ── Kaon ───────────────────────────────────────────────────────

/// Charged-kaon cuts in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KaonCut {
    /// Reconstructed PID is 321 or -321.
    Pid,
    /// chi2pid window.
    Chi2pid,
    /// DC region 1 fiducial.
    DcFiducialRegion1,
    /// DC region 2 fiducial.
    DcFiducialRegion2,
    /// DC region 3 fiducial.
    DcFiducialRegion3,
    /// Forward-detector track.
    Forward,
    /// Vertex difference to the trigger particle.
    DeltaVz,
}

impl SpeciesCut for KaonCut {
    const SPECIES: Species = Species::Kaon;

    const ALL: &'static [Self] = &[
        KaonCut::Pid,
        KaonCut::Chi2pid,
        KaonCut::DcFiducialRegion1,
        KaonCut::DcFiducialRegion2,
        KaonCut::DcFiducialRegion3,
        KaonCut::Forward,
        KaonCut::DeltaVz,
    ];

    fn name(self) -> &'static str {
        match self {
            KaonCut::Pid => "PID",
            KaonCut::Chi2pid => "CHI2PID",
            KaonCut::DcFiducialRegion1 => "DC_FIDUCIAL_REG1",
            KaonCut::DcFiducialRegion2 => "DC_FIDUCIAL_REG2",
            KaonCut::DcFiducialRegion3 => "DC_FIDUCIAL_REG3",
            KaonCut::Forward => "FORWARD",
            KaonCut::DeltaVz => "DELTA_VZ",
        }
    }

    fn predicate(self) -> CutFn {
        match self {
            KaonCut::Pid => |c, _| has_pid(c, 321) || has_pid(c, -321),
            KaonCut::Chi2pid => hadron_chi2pid,
            KaonCut::DcFiducialRegion1 => |c, _| hadron_dc(c, DcRegion::R1),
            KaonCut::DcFiducialRegion2 => |c, _| hadron_dc(c, DcRegion::R2),
            KaonCut::DcFiducialRegion3 => |c, _| hadron_dc(c, DcRegion::R3),
            KaonCut::Forward => forward,
            KaonCut::DeltaVz => hadron_delta_vz,
        }
    }
}

impl_cut_traits!(KaonCut);

// ── Photon ─────────────────────────────────────────────────────

/// Photon cuts in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotonCut {
    /// Reconstructed PID is 22.
    Pid,
    /// Forward-detector track.
    Forward,
    /// PCAL lv/lw edges at the photon strictness.
    EcFiducial,
    /// Beta window.
    Beta,
}

impl SpeciesCut for PhotonCut {
    const SPECIES: Species = Species::Photon;

    const ALL: &'static [Self] =
        &[PhotonCut::Pid, PhotonCut::Forward, PhotonCut::EcFiducial, PhotonCut::Beta];

    fn name(self) -> &'static str {
        match self {
            PhotonCut::Pid => "PID",
            PhotonCut::Forward => "FORWARD",
            PhotonCut::EcFiducial => "EC_FIDUCIAL",
            PhotonCut::Beta => "BETA",
        }
    }

    fn predicate(self) -> CutFn {
        match self {
            PhotonCut::Pid => |c, _| has_pid(c, 22),
            PhotonCut::Forward => forward,
            PhotonCut::EcFiducial => |c, cfg| pcal_fiducial_at(c, cfg.photon_fiducial),
            PhotonCut::Beta => |c, _| c.beta().is_some_and(cuts::photon_beta),
        }
    }
}

impl_cut_traits!(PhotonCut);

// ── Evaluation ─────────────────────────────────────────────────

/// `true` iff every cut in `cuts` accepts, evaluated in order and stopping at
/// the first rejection. An empty selection accepts.
pub fn passes<C: SpeciesCut>(candidate: &Candidate, cuts: &[C], config: &CutConfig) -> bool {
    cuts.iter().all(|&cut| {
        let ok = (cut.predicate())(candidate, config);
        if !ok {
            log::trace!("particle {}: {} cut {:?} rejected", candidate.index(), C::SPECIES, cut);
        }
        ok
    })
}

/// [`passes`] with the full chain.
pub fn passes_all<C: SpeciesCut>(candidate: &Candidate, config: &CutConfig) -> bool {
    passes(candidate, C::ALL, config)
}

/// First cut in `cuts` that rejects the candidate.
pub fn first_failure<C: SpeciesCut>(
    candidate: &Candidate,
    cuts: &[C],
    config: &CutConfig,
) -> Option<C> {
    cuts.iter().copied().find(|cut| !(cut.predicate())(candidate, config))
}

/// Every cut of the full chain that rejects the candidate, without
/// short-circuiting.
pub fn failures<C: SpeciesCut>(candidate: &Candidate, config: &CutConfig) -> Vec<C> {
    C::ALL.iter().copied().filter(|cut| !(cut.predicate())(candidate, config)).collect()
}

fn passes_named_as<C: SpeciesCut>(candidate: &Candidate, names: &[&str], config: &CutConfig) -> bool {
    names.iter().all(|name| match C::from_name(name) {
        Some(cut) => passes(candidate, &[cut], config),
        None => {
            log::debug!("unknown {} cut '{name}' rejects particle {}", C::SPECIES, candidate.index());
            false
        }
    })
}

/// Evaluate cuts selected by name. An unrecognized name rejects the
/// candidate, indistinguishable from a physics rejection; use
/// [`try_passes_named`] to tell the two apart.
pub fn passes_named(
    species: Species,
    candidate: &Candidate,
    names: &[&str],
    config: &CutConfig,
) -> bool {
    match species {
        Species::Electron => passes_named_as::<ElectronCut>(candidate, names, config),
        Species::Proton => passes_named_as::<ProtonCut>(candidate, names, config),
        Species::Kaon => passes_named_as::<KaonCut>(candidate, names, config),
        Species::Photon => passes_named_as::<PhotonCut>(candidate, names, config),
    }
}

fn validate_names<C: SpeciesCut>(names: &[&str]) -> Result<()> {
    match names.iter().find(|n| C::from_name(n).is_none()) {
        Some(bad) => Err(Error::UnknownCut { species: C::SPECIES, name: bad.to_string() }),
        None => Ok(()),
    }
}

/// Like [`passes_named`], but an unrecognized name is an
/// [`Error::UnknownCut`] instead of a rejection. Valid selections give the
/// same answer as [`passes_named`].
pub fn try_passes_named(
    species: Species,
    candidate: &Candidate,
    names: &[&str],
    config: &CutConfig,
) -> Result<bool> {
    match species {
        Species::Electron => validate_names::<ElectronCut>(names)?,
        Species::Proton => validate_names::<ProtonCut>(names)?,
        Species::Kaon => validate_names::<KaonCut>(names)?,
        Species::Photon => validate_names::<PhotonCut>(names)?,
    }
    Ok(passes_named(species, candidate, names, config))
}

/// Full chain for a species chosen at runtime.
pub fn passes_species(species: Species, candidate: &Candidate, config: &CutConfig) -> bool {
    match species {
        Species::Electron => passes_all::<ElectronCut>(candidate, config),
        Species::Proton => passes_all::<ProtonCut>(candidate, config),
        Species::Kaon => passes_all::<KaonCut>(candidate, config),
        Species::Photon => passes_all::<PhotonCut>(candidate, config),
    }
}

/// Full electron chain.
pub fn is_electron(candidate: &Candidate, config: &CutConfig) -> bool {
    passes_all::<ElectronCut>(candidate, config)
}

/// Full proton chain.
pub fn is_proton(candidate: &Candidate, config: &CutConfig) -> bool {
    passes_all::<ProtonCut>(candidate, config)
}

/// Full kaon chain, either charge.
pub fn is_kaon(candidate: &Candidate, config: &CutConfig) -> bool {
    passes_all::<KaonCut>(candidate, config)
}

/// Full kaon chain with PID 321.
pub fn is_kaon_plus(candidate: &Candidate, config: &CutConfig) -> bool {
    has_pid(candidate, 321) && is_kaon(candidate, config)
}

/// Full kaon chain with PID -321.
pub fn is_kaon_minus(candidate: &Candidate, config: &CutConfig) -> bool {
    has_pid(candidate, -321) && is_kaon(candidate, config)
}

/// Full photon chain.
pub fn is_photon(candidate: &Candidate, config: &CutConfig) -> bool {
    passes_all::<PhotonCut>(candidate, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for &cut in ElectronCut::ALL {
            assert_eq!(cut.name().parse::<ElectronCut>().unwrap(), cut);
        }
        for &cut in ProtonCut::ALL {
            assert_eq!(cut.to_string().parse::<ProtonCut>().unwrap(), cut);
        }
        for &cut in KaonCut::ALL {
            assert_eq!(KaonCut::from_name(cut.name()), Some(cut));
        }
        for &cut in PhotonCut::ALL {
            assert_eq!(PhotonCut::from_name(cut.name()), Some(cut));
        }
    }

    #[test]
    fn test_unknown_name_parse_error() {
        let err = "BETA".parse::<ElectronCut>().unwrap_err();
        match err {
            Error::UnknownCut { species, name } => {
                assert_eq!(species, Species::Electron);
                assert_eq!(name, "BETA");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_selection_accepts_empty_candidate() {
        let c = Candidate::builder(0).build();
        let cfg = CutConfig::default();
        assert!(passes::<ElectronCut>(&c, &[], &cfg));
        assert!(passes::<PhotonCut>(&c, &[], &cfg));
        assert!(passes_named(Species::Kaon, &c, &[], &cfg));
    }

    #[test]
    fn test_every_cut_rejects_empty_candidate() {
        let c = Candidate::builder(0).build();
        let cfg = CutConfig::default();
        // With no momentum at all, even the anti-pion cut has nothing to go on.
        assert_eq!(failures::<ElectronCut>(&c, &cfg), ElectronCut::ALL.to_vec());
        assert_eq!(failures::<ProtonCut>(&c, &cfg), ProtonCut::ALL.to_vec());
        assert_eq!(failures::<KaonCut>(&c, &cfg), KaonCut::ALL.to_vec());
        assert_eq!(failures::<PhotonCut>(&c, &cfg), PhotonCut::ALL.to_vec());
    }

    #[test]
    fn test_short_circuit_order() {
        let c = Candidate::builder(0).pid(Some(11)).build();
        let cfg = CutConfig::default();
        let order = [ElectronCut::Pid, ElectronCut::Vertex, ElectronCut::Charge];
        assert_eq!(first_failure(&c, &order, &cfg), Some(ElectronCut::Vertex));
        let order = [ElectronCut::Charge, ElectronCut::Vertex];
        assert_eq!(first_failure(&c, &order, &cfg), Some(ElectronCut::Charge));
    }

    #[test]
    fn test_unknown_name_rejects_but_checked_api_errors() {
        let c = Candidate::builder(0).pid(Some(22)).build();
        let cfg = CutConfig::default();
        assert!(passes_named(Species::Photon, &c, &["PID"], &cfg));
        assert!(!passes_named(Species::Photon, &c, &["PID", "CHARGE"], &cfg));
        assert!(try_passes_named(Species::Photon, &c, &["PID", "CHARGE"], &cfg).is_err());
        assert!(try_passes_named(Species::Photon, &c, &["PID"], &cfg).unwrap());
        assert!(!try_passes_named(Species::Photon, &c, &["BETA"], &cfg).unwrap());
    }

    #[test]
    fn test_anti_pion_without_pcal() {
        let cfg = CutConfig::default();
        let slow = Candidate::builder(0).momentum(Some(0.0), Some(0.0), Some(2.0)).build();
        assert!(passes(&slow, &[ElectronCut::AntiPion], &cfg));
        let fast = Candidate::builder(0).momentum(Some(0.0), Some(0.0), Some(6.0)).build();
        assert!(!passes(&fast, &[ElectronCut::AntiPion], &cfg));
    }

    #[test]
    fn test_kaon_charge_helpers() {
        let cfg = CutConfig::default();
        let kp = Candidate::builder(0).pid(Some(321)).build();
        let km = Candidate::builder(0).pid(Some(-321)).build();
        assert!(passes(&kp, &[KaonCut::Pid], &cfg));
        assert!(passes(&km, &[KaonCut::Pid], &cfg));
        // The rest of the chain needs measurements these candidates lack.
        assert!(!is_kaon_plus(&kp, &cfg));
        assert!(!is_kaon_minus(&kp, &cfg));
    }
}
