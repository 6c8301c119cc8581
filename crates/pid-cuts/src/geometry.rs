//! Sector geometry: azimuthal sector lookup, sector-frame rotation and
//! sector-corrected polar angles.
//!
//! All angles are in degrees. The beam runs along +z; sector 1 is centred on
//! φ = 0 and sectors advance counter-clockwise in 60° steps.

use std::fmt;

/// One of the six azimuthal detector sectors (1-based, as in the banks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sector(u8);

impl Sector {
    /// All sectors in numbering order.
    pub const ALL: [Sector; 6] =
        [Sector(1), Sector(2), Sector(3), Sector(4), Sector(5), Sector(6)];

    /// Validate a bank sector number. Anything outside `1..=6` is absent.
    pub fn new(number: i64) -> Option<Sector> {
        if (1..=6).contains(&number) { Some(Sector(number as u8)) } else { None }
    }

    /// Sector number, `1..=6`.
    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based table index, `0..=5`.
    #[inline]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Rotation that maps this sector onto sector 1, in degrees.
    #[inline]
    pub fn rotation_deg(self) -> f64 {
        -60.0 * f64::from(self.0 - 1)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Drift-chamber region a trajectory point was recorded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DcRegion {
    /// Region 1 (trajectory layer 6).
    R1,
    /// Region 2 (trajectory layer 18).
    R2,
    /// Region 3 (trajectory layer 36).
    R3,
}

impl DcRegion {
    /// All regions, innermost first.
    pub const ALL: [DcRegion; 3] = [DcRegion::R1, DcRegion::R2, DcRegion::R3];

    /// Map a `REC::Traj` DC layer code to its region.
    pub fn from_traj_layer(layer: i64) -> Option<DcRegion> {
        match layer {
            6 => Some(DcRegion::R1),
            18 => Some(DcRegion::R2),
            36 => Some(DcRegion::R3),
            _ => None,
        }
    }

    /// Zero-based table index.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            DcRegion::R1 => 0,
            DcRegion::R2 => 1,
            DcRegion::R3 => 2,
        }
    }
}

/// Sector for an azimuth in degrees, using half-open 60° bins
/// (`[-30, 30)` is sector 1, `[150, 180] ∪ (-180, -150)` is sector 4).
///
/// Returns `None` for NaN.
pub fn sector_from_phi(phi: f64) -> Option<Sector> {
    let n = if (-30.0..30.0).contains(&phi) {
        1
    } else if (30.0..90.0).contains(&phi) {
        2
    } else if (90.0..150.0).contains(&phi) {
        3
    } else if phi >= 150.0 || phi < -150.0 {
        4
    } else if (-150.0..-90.0).contains(&phi) {
        5
    } else if (-90.0..-30.0).contains(&phi) {
        6
    } else {
        return None;
    };
    Some(Sector(n))
}

/// Sector containing the point `(x, y, z)`.
///
/// The zero vector and non-finite coordinates have no sector.
pub fn sector_from_position(x: f64, y: f64, z: f64) -> Option<Sector> {
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return None;
    }
    if x == 0.0 && y == 0.0 && z == 0.0 {
        return None;
    }
    sector_from_phi(y.atan2(x).to_degrees())
}

/// Rotate `(x, y)` about the beam axis into the sector-1 reference frame.
pub fn rotate_to_sector_frame(x: f64, y: f64, sector: Sector) -> (f64, f64) {
    rotate(x, y, sector.rotation_deg())
}

/// Inverse of [`rotate_to_sector_frame`].
pub fn rotate_from_sector_frame(x: f64, y: f64, sector: Sector) -> (f64, f64) {
    rotate(x, y, -sector.rotation_deg())
}

#[inline]
fn rotate(x: f64, y: f64, angle_deg: f64) -> (f64, f64) {
    let (s, c) = angle_deg.to_radians().sin_cos();
    (x * c - y * s, x * s + y * c)
}

/// Polar angle and sector-local azimuth of a point, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarAngles {
    /// Angle to the beam axis, `[0, 180]`.
    pub theta: f64,
    /// Azimuth relative to the centre of the point's sector.
    pub phi: f64,
}

/// θ = acos(z/r) and φ shifted so the centre of `sector` sits at 0.
///
/// Sector 4 straddles ±180°, so its shift depends on the sign of the raw
/// azimuth; a raw azimuth of exactly 0 cannot belong to sector 4 and yields
/// `None`, as does a zero-length vector.
pub fn polar_angles(x: f64, y: f64, z: f64, sector: Sector) -> Option<PolarAngles> {
    let r = (x * x + y * y + z * z).sqrt();
    if !r.is_finite() || r == 0.0 {
        return None;
    }
    let theta = (z / r).acos().to_degrees();
    let raw = y.atan2(x).to_degrees();
    let phi = match sector.number() {
        1 => raw,
        2 => raw - 60.0,
        3 => raw - 120.0,
        4 if raw > 0.0 => raw - 180.0,
        4 if raw < 0.0 => raw + 180.0,
        5 => raw + 120.0,
        6 => raw + 60.0,
        _ => return None,
    };
    Some(PolarAngles { theta, phi })
}
