//! Calibration constants for the cut predicates.
//!
//! Tables are indexed `[polarity][strictness][sector]` or
//! `[sector][region][coefficient]` with zero-based indices from
//! [`Polarity::index`](pid_core::Polarity::index),
//! [`Strictness::index`](pid_core::Strictness::index),
//! [`Sector::index`](crate::geometry::Sector::index) and
//! [`DcRegion::index`](crate::geometry::DcRegion::index).

// ── Vertex window ──────────────────────────────────────────────

/// Nominal `(min, max)` vertex z in cm, per polarity.
pub const VZ_WINDOW: [(f64, f64); 2] = [(-13.0, 12.0), (-18.0, 10.0)];

/// Offsets added to `(min, max)` of [`VZ_WINDOW`], per polarity and strictness.
pub const VZ_OFFSETS: [[(f64, f64); 3]; 2] = [
    [(-1.6, 2.5), (0.0, 0.0), (1.0, -1.9)],
    [(-1.0, 1.0), (0.0, 0.0), (1.0, -1.0)],
];

// ── PCAL fiducial ──────────────────────────────────────────────

/// Minimum PCAL `lv` in cm. Inbending is sector-independent.
pub const PCAL_MIN_V: [[[f64; 6]; 3]; 2] = [
    [
        [9.0, 9.0, 9.0, 9.0, 9.0, 9.0],
        [14.0, 14.0, 14.0, 14.0, 14.0, 14.0],
        [19.0, 19.0, 19.0, 19.0, 19.0, 19.0],
    ],
    [
        [10.25, 8.0, 12.75, 12.5, 13.25, 9.0],
        [16.0, 10.5, 17.0, 14.25, 18.0, 11.0],
        [18.0, 12.0, 19.5, 15.5, 20.0, 13.0],
    ],
];

/// Minimum PCAL `lw` in cm.
pub const PCAL_MIN_W: [[[f64; 6]; 3]; 2] = [
    [
        [9.0, 9.0, 9.0, 9.0, 9.0, 9.0],
        [14.0, 14.0, 14.0, 14.0, 14.0, 14.0],
        [19.0, 19.0, 19.0, 19.0, 19.0, 19.0],
    ],
    [
        [7.25, 11.0, 13.0, 5.5, 10.0, 6.0],
        [11.0, 17.5, 16.25, 7.5, 14.5, 9.25],
        [14.0, 18.7, 18.7, 12.0, 16.0, 13.0],
    ],
];

// ── Calorimeter energy ─────────────────────────────────────────

/// Momentum (GeV) above which the anti-pion test applies.
pub const ANTI_PION_MIN_P: f64 = 4.5;

/// Diagonal threshold of the PCAL/p vs ECin/p anti-pion line.
pub const ANTI_PION_THRESHOLD: f64 = 0.2;

/// Base minimum PCAL deposit in GeV.
pub const EIEO_MIN_PCAL: f64 = 0.07;

/// Offsets to [`EIEO_MIN_PCAL`], per strictness.
pub const EIEO_OFFSETS: [f64; 3] = [-0.01, 0.0, 0.02];

/// Width of the sampling-fraction band in units of sigma.
pub const SF_SIGMA_RANGE: f64 = 3.5;

/// Sampling-fraction mean parameters `[mu0, mu1, mu2]` by sector.
pub const SF_MEAN: [[f64; 6]; 3] = [
    [0.2531, 0.2550, 0.2514, 0.2494, 0.2528, 0.2521],
    [-0.6502, -0.7472, -0.7674, -0.4913, -0.3988, -0.703],
    [4.939, 5.350, 5.102, 6.440, 6.149, 4.957],
];

/// Sampling-fraction sigma parameters `[s0, s1, s2]` by sector.
pub const SF_SIGMA: [[f64; 6]; 3] = [
    [2.726e-3, 4.157e-3, 5.222e-3, 5.398e-3, 8.453e-3, 6.533e-3],
    [1.062, 0.859, 0.5564, 0.6576, 0.3242, 0.4423],
    [-4.089, -3.318, -2.078, -2.565, -0.8223, -1.274],
];

// ── Drift-chamber fiducial, XY variant ─────────────────────────

/// Lower edge `y' > a + b·x'` as `[a, b]`, per sector and region.
pub const DC_XY_MIN: [[[f64; 2]; 3]; 6] = [
    [[7.62814, -0.56319], [18.2833, -0.587275], [20.2027, -0.54605]],
    [[9.20907, -0.586977], [10.493, -0.544243], [23.0759, -0.581959]],
    [[12.5459, -0.631322], [20.5635, -0.618555], [26.3621, -0.576806]],
    [[8.36343, -0.552394], [14.7596, -0.554798], [29.5554, -0.60545]],
    [[16.3732, -0.663303], [10.0255, -0.533019], [31.6086, -0.617053]],
    [[8.20222, -0.567211], [20.0181, -0.605458], [22.2098, -0.567599]],
];

/// Upper edge `y' < a + b·x'` as `[a, b]`, per sector and region.
pub const DC_XY_MAX: [[[f64; 2]; 3]; 6] = [
    [[-7.49907, 0.583375], [-18.8174, 0.599219], [-23.9353, 0.574699]],
    [[-14.0547, 0.631533], [-14.4223, 0.597079], [-14.838, 0.547436]],
    [[-7.72508, 0.578501], [-18.7928, 0.56725], [-29.9003, 0.612354]],
    [[-6.12844, 0.566777], [-13.6772, 0.573262], [-26.1895, 0.591816]],
    [[-20.0718, 0.670941], [-9.4775, 0.511748], [-28.0869, 0.590488]],
    [[-9.52924, 0.591687], [-17.8564, 0.596417], [-23.5661, 0.576317]],
];

// ── Drift-chamber fiducial, θ–φ variant ────────────────────────

/// Lower φ edge `c0 + c1·ln θ + c2·θ + c3·θ²`, per sector and region.
pub const DC_THETA_PHI_MIN: [[[f64; 4]; 3]; 6] = [
    [
        [37.289, -27.5201, 1.12866, -0.00526111],
        [45.3103, -33.5226, 1.72923, -0.0114495],
        [61.5709, -47.6158, 3.4295, -0.0316429],
    ],
    [
        [36.6259, -27.4064, 1.16617, -0.00604629],
        [50.3751, -37.5848, 2.19621, -0.0169241],
        [35.1563, -26.514, 1.09795, -0.00545864],
    ],
    [
        [27.2367, -20.3068, 0.517752, -0.000335432],
        [39.0489, -28.6903, 1.24306, -0.0065226],
        [41.0208, -30.0339, 1.30776, -0.00626721],
    ],
    [
        [29.261, -21.7041, 0.613556, -0.000774652],
        [39.5304, -29.1388, 1.34116, -0.00823818],
        [44.5313, -33.4056, 1.77581, -0.0123965],
    ],
    [
        [36.5659, -25.119, 0.714074, -2.65397e-11],
        [31.6524, -22.6934, 0.613977, -5.46634e-10],
        [34.7312, -24.9901, 0.749061, -1.22922e-09],
    ],
    [
        [33.154, -23.8803, 0.685794, -1.13236e-10],
        [42.6731, -31.0799, 1.40425, -0.00730816],
        [46.4732, -35.6988, 2.10144, -0.0164771],
    ],
];

/// Upper φ edge `c0 + c1·ln θ + c2·θ + c3·θ²`, per sector and region.
pub const DC_THETA_PHI_MAX: [[[f64; 4]; 3]; 6] = [
    [
        [-35.1716, 25.102, -0.750281, 5.34679e-05],
        [-39.1633, 28.5551, -1.13429, 0.00419047],
        [-33.7705, 24.8068, -0.811239, 0.00138345],
    ],
    [
        [-36.2389, 26.7979, -1.08147, 0.0050898],
        [-43.643, 31.6783, -1.49203, 0.00872922],
        [-54.4042, 40.6516, -2.52393, 0.0205649],
    ],
    [
        [-38.3238, 26.1667, -0.777077, 0.000264835],
        [-34.2011, 24.2843, -0.696392, 3.75866e-12],
        [-36.4636, 25.8712, -0.786592, 2.24421e-10],
    ],
    [
        [-31.8019, 23.154, -0.653992, 2.69968e-05],
        [-34.6637, 24.6043, -0.714901, 2.02675e-10],
        [-36.7209, 26.2469, -0.828638, 0.000340435],
    ],
    [
        [-33.4016, 24.6901, -0.779889, 0.000430557],
        [-35.4583, 24.7491, -0.707953, 2.18559e-10],
        [-37.7335, 28.1547, -1.1986, 0.00582395],
    ],
    [
        [-34.7808, 24.6988, -0.719936, 5.73299e-10],
        [-54.5797, 40.9138, -2.57493, 0.0213354],
        [-38.4972, 28.3142, -1.21741, 0.00640373],
    ],
];

// ── Hadron identification ──────────────────────────────────────

/// Symmetric `|chi2pid|` bound for species without a momentum-dependent fit.
pub const CHI2PID_MAX: f64 = 3.0;

/// Band scale `C` for π+ and π−.
pub const CHI2PID_PION_SCALE: [(i32, f64); 2] = [(211, 0.88), (-211, 0.93)];

/// Momentum (GeV) below which the pion upper bound is flat at `3·C`.
pub const CHI2PID_PION_P_FLAT: f64 = 2.44;

/// Momentum (GeV) separating the two double-exponential pion fits.
pub const CHI2PID_PION_P_SPLIT: f64 = 4.6;

/// `a + b·exp(-p/c) + d·exp(-p/e)` pion upper bound for `2.44 ≤ p < 4.6`.
pub const CHI2PID_PION_MID: [f64; 5] = [0.00869, 14.98587, 1.18236, 1.81751, 4.86394];

/// Same form as [`CHI2PID_PION_MID`] for `p ≥ 4.6`.
pub const CHI2PID_PION_HIGH: [f64; 5] = [-1.14099, 24.14992, 1.36554, 2.66876, 6.80552];

/// Open `(min, max)` band on `vz - vz_trigger` in cm for hadrons, per polarity.
pub const DELTA_VZ_HADRON: [(f64, f64); 2] = [(-20.0, 20.0), (-20.0, 20.0)];

/// Forward-detector status band `[min, max)`.
pub const FORWARD_STATUS: (i32, i32) = (2000, 4000);

/// Open `(min, max)` photon beta band.
pub const PHOTON_BETA: (f64, f64) = (0.9, 1.1);
