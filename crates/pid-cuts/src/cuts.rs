//! Cut predicates.
//!
//! Each function takes already-extracted measurements and returns whether
//! the particle is accepted. Missing measurements are handled by the callers
//! in [`crate::chain`]; everything here assumes its inputs exist.

use pid_core::{Polarity, Strictness};

use crate::geometry::{self, DcRegion, Sector};
use crate::tables::*;

// ── Reconstruction flags ───────────────────────────────────────

/// Trigger particles carry a negative status.
#[inline]
pub fn trigger_status(status: i32) -> bool {
    status < 0
}

/// Status codes of tracks reconstructed in the forward detector.
#[inline]
pub fn forward_detector(status: i32) -> bool {
    let (lo, hi) = FORWARD_STATUS;
    (lo..hi).contains(&status)
}

/// Negatively charged track.
#[inline]
pub fn negative_charge(charge: i32) -> bool {
    charge < 0
}

/// Photon timing: `0.9 < beta < 1.1`.
#[inline]
pub fn photon_beta(beta: f64) -> bool {
    let (lo, hi) = PHOTON_BETA;
    beta > lo && beta < hi
}

// ── Vertex ─────────────────────────────────────────────────────

/// Open `(min, max)` vertex-z window for a polarity and strictness level.
pub fn vertex_bounds(polarity: Polarity, level: Strictness) -> (f64, f64) {
    let (min, max) = VZ_WINDOW[polarity.index()];
    let (dmin, dmax) = VZ_OFFSETS[polarity.index()][level.index()];
    (min + dmin, max + dmax)
}

/// Vertex z strictly inside [`vertex_bounds`].
pub fn vertex_window(vz: f64, polarity: Polarity, level: Strictness) -> bool {
    let (min, max) = vertex_bounds(polarity, level);
    vz > min && vz < max
}

/// Vertex difference to the trigger particle strictly inside the hadron band.
pub fn delta_vz_window(dvz: f64, polarity: Polarity) -> bool {
    let (min, max) = DELTA_VZ_HADRON[polarity.index()];
    dvz > min && dvz < max
}

// ── Calorimeter ────────────────────────────────────────────────

/// PCAL hit far enough from the V and W edges. The far edge of the
/// calorimeter is never reached, so there is no upper bound.
pub fn pcal_fiducial(
    sector: Sector,
    lv: f64,
    lw: f64,
    polarity: Polarity,
    level: Strictness,
) -> bool {
    let (p, l, s) = (polarity.index(), level.index(), sector.index());
    lv > PCAL_MIN_V[p][l][s] && lw > PCAL_MIN_W[p][l][s]
}

/// Pion rejection in the PCAL/p vs ECin/p plane for `p ≥ 4.5` GeV.
///
/// An ECin deposit of exactly zero always fails above the momentum threshold.
pub fn anti_pion(p: f64, pcal_energy: f64, ecin_energy: f64) -> bool {
    if p < ANTI_PION_MIN_P {
        return true;
    }
    if ecin_energy == 0.0 {
        return false;
    }
    (-pcal_energy / p + ANTI_PION_THRESHOLD) < (ecin_energy / p)
}

/// Minimum PCAL deposit for a strictness level.
pub fn eieo_threshold(level: Strictness) -> f64 {
    EIEO_MIN_PCAL + EIEO_OFFSETS[level.index()]
}

/// PCAL deposit above [`eieo_threshold`].
pub fn eieo(pcal_energy: f64, level: Strictness) -> bool {
    pcal_energy > eieo_threshold(level)
}

/// Expected sampling-fraction mean and sigma at momentum `p`.
pub fn sampling_fraction_params(p: f64, sector: Sector) -> (f64, f64) {
    let s = sector.index();
    let mean = SF_MEAN[0][s] + SF_MEAN[1][s] / 1000.0 * (p - SF_MEAN[2][s]).powi(2);
    let sigma = SF_SIGMA[0][s] + SF_SIGMA[1][s] / (10.0 * (p - SF_SIGMA[2][s]));
    (mean, sigma)
}

/// `(lower, upper)` edges of the accepted sampling-fraction band.
pub fn sampling_fraction_band(p: f64, sector: Sector) -> (f64, f64) {
    let (mean, sigma) = sampling_fraction_params(p, sector);
    (mean - SF_SIGMA_RANGE * sigma, mean + SF_SIGMA_RANGE * sigma)
}

/// Total calorimeter deposit over momentum inside the band, edges included.
pub fn sampling_fraction(
    p: f64,
    sector: Sector,
    pcal_energy: f64,
    ecin_energy: f64,
    ecout_energy: f64,
) -> bool {
    let edep = pcal_energy + ecin_energy + ecout_energy;
    let sf = edep / p;
    let (lower, upper) = sampling_fraction_band(p, sector);
    sf <= upper && sf >= lower
}

// ── Drift chamber ──────────────────────────────────────────────

/// Straight-line DC fiducial cut in the sector-1 frame.
pub fn dc_fiducial_xy(sector: Sector, region: DcRegion, x: f64, y: f64) -> bool {
    let (xr, yr) = geometry::rotate_to_sector_frame(x, y, sector);
    let [a_min, b_min] = DC_XY_MIN[sector.index()][region.index()];
    let [a_max, b_max] = DC_XY_MAX[sector.index()][region.index()];
    let min = a_min + b_min * xr;
    let max = a_max + b_max * xr;
    yr > min && yr < max
}

#[inline]
fn log_theta_poly(c: &[f64; 4], theta: f64) -> f64 {
    c[0] + c[1] * theta.ln() + c[2] * theta + c[3] * theta * theta
}

/// DC fiducial cut on the sector-local azimuth as a function of polar angle.
pub fn dc_fiducial_theta_phi(sector: Sector, region: DcRegion, x: f64, y: f64, z: f64) -> bool {
    let Some(angles) = geometry::polar_angles(x, y, z, sector) else {
        return false;
    };
    let min = log_theta_poly(&DC_THETA_PHI_MIN[sector.index()][region.index()], angles.theta);
    let max = log_theta_poly(&DC_THETA_PHI_MAX[sector.index()][region.index()], angles.theta);
    angles.phi > min && angles.phi < max
}

// ── Hadron identification ──────────────────────────────────────

#[inline]
fn double_exp(c: &[f64; 5], p: f64) -> f64 {
    c[0] + c[1] * (-p / c[2]).exp() + c[3] * (-p / c[4]).exp()
}

/// `(lower, upper)` chi2pid band for a reconstructed PID at momentum `p`.
///
/// Charged pions use momentum-dependent fits scaled by a charge-dependent
/// factor; every other code uses `|chi2pid| < 3`.
pub fn chi2pid_bounds(p: f64, pid: i32) -> (f64, f64) {
    let Some(&(_, scale)) = CHI2PID_PION_SCALE.iter().find(|(code, _)| *code == pid) else {
        return (-CHI2PID_MAX, CHI2PID_MAX);
    };
    let upper = if p < CHI2PID_PION_P_FLAT {
        CHI2PID_MAX
    } else if p < CHI2PID_PION_P_SPLIT {
        double_exp(&CHI2PID_PION_MID, p)
    } else {
        double_exp(&CHI2PID_PION_HIGH, p)
    };
    (-CHI2PID_MAX * scale, upper * scale)
}

/// chi2pid strictly inside [`chi2pid_bounds`].
pub fn chi2pid_window(chi2pid: f64, p: f64, pid: i32) -> bool {
    let (lo, hi) = chi2pid_bounds(p, pid);
    chi2pid > lo && chi2pid < hi
}
