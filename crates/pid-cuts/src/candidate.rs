//! Per-particle measurement record shared by every species chain.

use pid_core::{LorentzVector, Polarity, Species};

use crate::geometry::{self, DcRegion, Sector};

/// Trajectory point at one drift-chamber region. Each coordinate may be
/// missing independently.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrajPoint {
    /// x in cm
    pub x: Option<f32>,
    /// y in cm
    pub y: Option<f32>,
    /// z in cm
    pub z: Option<f32>,
}

impl TrajPoint {
    /// `(x, y)` when both are present.
    pub fn xy(&self) -> Option<(f64, f64)> {
        Some((f64::from(self.x?), f64::from(self.y?)))
    }

    /// `(x, y, z)` when all three are present.
    pub fn xyz(&self) -> Option<(f64, f64, f64)> {
        Some((f64::from(self.x?), f64::from(self.y?), f64::from(self.z?)))
    }
}

/// Measurements of one reconstructed particle in one event.
///
/// Built once through [`CandidateBuilder`] or [`Candidate::from_banks`] and
/// read-only afterwards. Every measurement is optional; the ECin and ECout
/// deposits default to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    index: usize,
    polarity: Polarity,
    pid: Option<i32>,
    charge: Option<i8>,
    status: Option<i16>,
    px: Option<f32>,
    py: Option<f32>,
    pz: Option<f32>,
    p: Option<f32>,
    vz: Option<f32>,
    beta: Option<f32>,
    chi2pid: Option<f32>,
    dvz: Option<f32>,
    nphe: Option<f32>,
    pcal_sector: Option<Sector>,
    pcal_energy: Option<f32>,
    ecin_energy: f32,
    ecout_energy: f32,
    pcal_lv: Option<f32>,
    pcal_lw: Option<f32>,
    dc: [TrajPoint; 3],
    dc_sector: Option<Sector>,
}

#[inline]
fn widen(v: Option<f32>) -> Option<f64> {
    v.map(f64::from)
}

impl Candidate {
    /// Start building the candidate for particle row `index`.
    pub fn builder(index: usize) -> CandidateBuilder {
        CandidateBuilder::new(index)
    }

    /// Row of this particle in the particle bank.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Field configuration the candidate was recorded with.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Reconstructed PDG code.
    pub fn pid(&self) -> Option<i32> {
        self.pid
    }

    /// Reconstructed charge.
    pub fn charge(&self) -> Option<i32> {
        self.charge.map(i32::from)
    }

    /// Reconstruction status code.
    pub fn status(&self) -> Option<i32> {
        self.status.map(i32::from)
    }

    /// Momentum components `(px, py, pz)` when all three are present.
    pub fn momentum(&self) -> Option<(f64, f64, f64)> {
        Some((f64::from(self.px?), f64::from(self.py?), f64::from(self.pz?)))
    }

    /// Momentum magnitude.
    pub fn p(&self) -> Option<f64> {
        widen(self.p)
    }

    /// Vertex z in cm.
    pub fn vz(&self) -> Option<f64> {
        widen(self.vz)
    }

    /// Velocity over c.
    pub fn beta(&self) -> Option<f64> {
        widen(self.beta)
    }

    /// PID goodness-of-fit.
    pub fn chi2pid(&self) -> Option<f64> {
        widen(self.chi2pid)
    }

    /// `vz - vz_trigger` in cm.
    pub fn dvz(&self) -> Option<f64> {
        widen(self.dvz)
    }

    /// HTCC photo-electron count.
    pub fn nphe(&self) -> Option<f64> {
        widen(self.nphe)
    }

    /// Sector of the PCAL hit.
    pub fn pcal_sector(&self) -> Option<Sector> {
        self.pcal_sector
    }

    /// PCAL deposit in GeV.
    pub fn pcal_energy(&self) -> Option<f64> {
        widen(self.pcal_energy)
    }

    /// ECin deposit in GeV (zero without a hit).
    pub fn ecin_energy(&self) -> f64 {
        f64::from(self.ecin_energy)
    }

    /// ECout deposit in GeV (zero without a hit).
    pub fn ecout_energy(&self) -> f64 {
        f64::from(self.ecout_energy)
    }

    /// PCAL local V coordinate in cm.
    pub fn pcal_lv(&self) -> Option<f64> {
        widen(self.pcal_lv)
    }

    /// PCAL local W coordinate in cm.
    pub fn pcal_lw(&self) -> Option<f64> {
        widen(self.pcal_lw)
    }

    /// Trajectory point at a drift-chamber region.
    pub fn dc_point(&self, region: DcRegion) -> &TrajPoint {
        &self.dc[region.index()]
    }

    /// Sector of the region-2 trajectory point.
    pub fn dc_sector(&self) -> Option<Sector> {
        self.dc_sector
    }

    /// Four-momentum under a species mass hypothesis.
    pub fn lorentz_vector(&self, species: Species) -> Option<LorentzVector> {
        let (px, py, pz) = self.momentum()?;
        Some(LorentzVector::from_momentum_mass(px, py, pz, species.mass()))
    }
}

/// Construction-time setters for [`Candidate`].
///
/// Floating-point inputs are narrowed to `f32`, integer inputs to the bank's
/// native width. `None` marks a measurement as missing (ECin/ECout: zero).
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    inner: Candidate,
    trigger_vz: Option<f32>,
}

#[inline]
fn narrow(v: Option<f64>) -> Option<f32> {
    v.map(|x| x as f32)
}

impl CandidateBuilder {
    /// Empty candidate for particle row `index`, inbending.
    pub fn new(index: usize) -> Self {
        Self {
            inner: Candidate {
                index,
                polarity: Polarity::Inbending,
                pid: None,
                charge: None,
                status: None,
                px: None,
                py: None,
                pz: None,
                p: None,
                vz: None,
                beta: None,
                chi2pid: None,
                dvz: None,
                nphe: None,
                pcal_sector: None,
                pcal_energy: None,
                ecin_energy: 0.0,
                ecout_energy: 0.0,
                pcal_lv: None,
                pcal_lw: None,
                dc: [TrajPoint::default(); 3],
                dc_sector: None,
            },
            trigger_vz: None,
        }
    }

    /// Field configuration.
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.inner.polarity = polarity;
        self
    }

    /// Reconstructed PDG code.
    pub fn pid(mut self, pid: Option<i64>) -> Self {
        self.inner.pid = pid.map(|v| v as i32);
        self
    }

    /// Reconstructed charge.
    pub fn charge(mut self, charge: Option<i64>) -> Self {
        self.inner.charge = charge.map(|v| v as i8);
        self
    }

    /// Status code.
    pub fn status(mut self, status: Option<i64>) -> Self {
        self.inner.status = status.map(|v| v as i16);
        self
    }

    /// Momentum components. The magnitude is set only when all three are present.
    pub fn momentum(mut self, px: Option<f64>, py: Option<f64>, pz: Option<f64>) -> Self {
        let c = &mut self.inner;
        c.px = narrow(px);
        c.py = narrow(py);
        c.pz = narrow(pz);
        c.p = match (c.px, c.py, c.pz) {
            (Some(x), Some(y), Some(z)) => {
                let (x, y, z) = (f64::from(x), f64::from(y), f64::from(z));
                Some((x * x + y * y + z * z).sqrt() as f32)
            }
            _ => None,
        };
        self
    }

    /// Vertex z.
    pub fn vz(mut self, vz: Option<f64>) -> Self {
        self.inner.vz = narrow(vz);
        self
    }

    /// Vertex z of the event's trigger particle, used for `dvz`.
    pub fn trigger_vz(mut self, vz: Option<f64>) -> Self {
        self.trigger_vz = narrow(vz);
        self
    }

    /// Beta.
    pub fn beta(mut self, beta: Option<f64>) -> Self {
        self.inner.beta = narrow(beta);
        self
    }

    /// chi2pid.
    pub fn chi2pid(mut self, chi2pid: Option<f64>) -> Self {
        self.inner.chi2pid = narrow(chi2pid);
        self
    }

    /// HTCC photo-electrons.
    pub fn nphe(mut self, nphe: Option<f64>) -> Self {
        self.inner.nphe = narrow(nphe);
        self
    }

    /// PCAL sector; values outside `1..=6` leave the sector unresolved.
    pub fn pcal_sector(mut self, sector: Option<i64>) -> Self {
        self.inner.pcal_sector = sector.and_then(Sector::new);
        self
    }

    /// PCAL deposit.
    pub fn pcal_energy(mut self, energy: Option<f64>) -> Self {
        self.inner.pcal_energy = narrow(energy);
        self
    }

    /// ECin deposit; missing means zero.
    pub fn ecin_energy(mut self, energy: Option<f64>) -> Self {
        self.inner.ecin_energy = narrow(energy).unwrap_or(0.0);
        self
    }

    /// ECout deposit; missing means zero.
    pub fn ecout_energy(mut self, energy: Option<f64>) -> Self {
        self.inner.ecout_energy = narrow(energy).unwrap_or(0.0);
        self
    }

    /// PCAL local coordinates.
    pub fn pcal_vw(mut self, lv: Option<f64>, lw: Option<f64>) -> Self {
        self.inner.pcal_lv = narrow(lv);
        self.inner.pcal_lw = narrow(lw);
        self
    }

    /// DC trajectory point. A complete region-2 point also fixes the DC sector.
    pub fn dc_point(
        mut self,
        region: DcRegion,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    ) -> Self {
        let point = TrajPoint { x: narrow(x), y: narrow(y), z: narrow(z) };
        self.inner.dc[region.index()] = point;
        if region == DcRegion::R2 {
            self.inner.dc_sector =
                point.xyz().and_then(|(x, y, z)| geometry::sector_from_position(x, y, z));
        }
        self
    }

    /// Finish construction. `dvz` is derived here from `vz` and the trigger vertex.
    pub fn build(self) -> Candidate {
        let mut c = self.inner;
        c.dvz = match (c.vz, self.trigger_vz) {
            (Some(vz), Some(t)) => Some(vz - t),
            _ => None,
        };
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_momentum_magnitude() {
        let c = Candidate::builder(0).momentum(Some(3.0), Some(4.0), Some(12.0)).build();
        assert_relative_eq!(c.p().unwrap(), 13.0, epsilon = 1e-6);
        assert_eq!(c.momentum(), Some((3.0, 4.0, 12.0)));
    }

    #[test]
    fn test_partial_momentum_leaves_magnitude_absent() {
        let c = Candidate::builder(0).momentum(Some(3.0), None, Some(12.0)).build();
        assert_eq!(c.p(), None);
        assert_eq!(c.momentum(), None);
        assert!(c.lorentz_vector(Species::Electron).is_none());
    }

    #[test]
    fn test_missing_is_not_zero() {
        let c = Candidate::builder(2).build();
        assert_eq!(c.index(), 2);
        assert_eq!(c.vz(), None);
        assert_eq!(c.pcal_energy(), None);
        assert_eq!(c.pcal_sector(), None);
        assert_eq!(c.ecin_energy(), 0.0);
        assert_eq!(c.ecout_energy(), 0.0);
        let c = Candidate::builder(2).ecin_energy(None).ecout_energy(Some(0.25)).build();
        assert_eq!(c.ecin_energy(), 0.0);
        assert_eq!(c.ecout_energy(), 0.25);
    }

    #[test]
    fn test_dc_sector_from_complete_region_two() {
        let c = Candidate::builder(0)
            .dc_point(DcRegion::R1, Some(-50.0), Some(0.0), Some(200.0))
            .dc_point(DcRegion::R2, Some(0.0), Some(100.0), Some(300.0))
            .build();
        assert_eq!(c.dc_sector().map(Sector::number), Some(3));

        let c = Candidate::builder(0)
            .dc_point(DcRegion::R2, Some(0.0), None, Some(300.0))
            .build();
        assert_eq!(c.dc_sector(), None);
        assert_eq!(c.dc_point(DcRegion::R2).xy(), None);
        assert_eq!(c.dc_point(DcRegion::R2).x, Some(0.0));
    }

    #[test]
    fn test_dvz_needs_both_vertices() {
        let c = Candidate::builder(1).vz(Some(-2.5)).trigger_vz(Some(1.0)).build();
        assert_relative_eq!(c.dvz().unwrap(), -3.5);
        let c = Candidate::builder(1).vz(Some(-2.5)).build();
        assert_eq!(c.dvz(), None);
    }

    #[test]
    fn test_integer_coercion() {
        let c = Candidate::builder(0)
            .pid(Some(2212))
            .charge(Some(1))
            .status(Some(2110))
            .pcal_sector(Some(7))
            .build();
        assert_eq!(c.pid(), Some(2212));
        assert_eq!(c.charge(), Some(1));
        assert_eq!(c.status(), Some(2110));
        assert_eq!(c.pcal_sector(), None);
    }

    #[test]
    fn test_lorentz_vector_mass_hypothesis() {
        let c = Candidate::builder(0).momentum(Some(0.0), Some(0.0), Some(2.0)).build();
        let v = c.lorentz_vector(Species::Kaon).unwrap();
        assert_relative_eq!(v.mass(), 0.493677, epsilon = 1e-9);
    }
}
