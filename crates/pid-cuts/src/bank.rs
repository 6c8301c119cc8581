//! In-memory reconstruction banks and bank-driven candidate construction.

use pid_core::{Bank, Error, Polarity, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::candidate::Candidate;
use crate::geometry::DcRegion;

/// Detector identifiers used in the `detector` column of hit banks.
pub mod detector {
    /// Drift chambers.
    pub const DC: i64 = 6;
    /// Electromagnetic calorimeter (PCAL + ECin + ECout).
    pub const ECAL: i64 = 7;
    /// High-threshold Cherenkov counter.
    pub const HTCC: i64 = 15;
}

/// ECAL `layer` codes of the first hit in each calorimeter stack.
pub mod ecal_layer {
    /// PCAL (entry layer).
    pub const PCAL: i64 = 1;
    /// EC inner.
    pub const ECIN: i64 = 4;
    /// EC outer.
    pub const ECOUT: i64 = 7;
}

type Columns = BTreeMap<String, Vec<Option<f64>>>;

/// Column-oriented bank with per-cell missing values.
///
/// Serialized as a JSON object of equal-length arrays; `null` cells are
/// missing measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Columns", into = "Columns")]
pub struct ColumnBank {
    n_rows: usize,
    columns: Columns,
}

impl ColumnBank {
    /// Build a bank from named columns. All columns must have the same length.
    pub fn from_columns<S: Into<String>>(
        columns: impl IntoIterator<Item = (S, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        let mut n_rows: Option<usize> = None;
        let mut out = Columns::new();
        for (name, col) in columns {
            let name = name.into();
            match n_rows {
                Some(n) if n != col.len() => {
                    return Err(Error::Validation(format!(
                        "column length mismatch for '{name}': expected {n}, got {}",
                        col.len()
                    )));
                }
                Some(_) => {}
                None => n_rows = Some(col.len()),
            }
            if out.insert(name.clone(), col).is_some() {
                return Err(Error::Validation(format!("duplicate column '{name}'")));
            }
        }
        Ok(Self { n_rows: n_rows.unwrap_or(0), columns: out })
    }

    /// Build a bank from columns without missing cells.
    pub fn from_dense<S: Into<String>>(columns: impl IntoIterator<Item = (S, Vec<f64>)>) -> Result<Self> {
        Self::from_columns(
            columns.into_iter().map(|(n, c)| (n, c.into_iter().map(Some).collect::<Vec<_>>())),
        )
    }

    /// Column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

impl TryFrom<Columns> for ColumnBank {
    type Error = Error;

    fn try_from(columns: Columns) -> Result<Self> {
        ColumnBank::from_columns(columns)
    }
}

impl From<ColumnBank> for Columns {
    fn from(bank: ColumnBank) -> Self {
        bank.columns
    }
}

impl Bank for ColumnBank {
    fn rows(&self) -> usize {
        self.n_rows
    }

    fn float(&self, column: &str, row: usize) -> Option<f64> {
        self.columns.get(column)?.get(row).copied().flatten()
    }
}

/// Borrowed view of the banks of one event. Any bank may be absent.
#[derive(Clone, Copy, Default)]
pub struct BankSet<'a> {
    /// `REC::Particle`
    pub particle: Option<&'a dyn Bank>,
    /// `REC::Calorimeter`
    pub calorimeter: Option<&'a dyn Bank>,
    /// `REC::Cherenkov`
    pub cherenkov: Option<&'a dyn Bank>,
    /// `REC::Traj`
    pub traj: Option<&'a dyn Bank>,
}

impl BankSet<'_> {
    /// Number of particles, i.e. rows of the particle bank.
    pub fn n_particles(&self) -> usize {
        self.particle.map_or(0, |b| b.rows())
    }
}

/// Owned banks of one event, loadable from JSON keyed by bank name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventBanks {
    /// `REC::Particle`
    #[serde(default, rename = "REC::Particle", skip_serializing_if = "Option::is_none")]
    pub particle: Option<ColumnBank>,
    /// `REC::Calorimeter`
    #[serde(default, rename = "REC::Calorimeter", skip_serializing_if = "Option::is_none")]
    pub calorimeter: Option<ColumnBank>,
    /// `REC::Cherenkov`
    #[serde(default, rename = "REC::Cherenkov", skip_serializing_if = "Option::is_none")]
    pub cherenkov: Option<ColumnBank>,
    /// `REC::Traj`
    #[serde(default, rename = "REC::Traj", skip_serializing_if = "Option::is_none")]
    pub traj: Option<ColumnBank>,
}

impl EventBanks {
    /// Parse one event from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Borrow as a [`BankSet`].
    pub fn bank_set(&self) -> BankSet<'_> {
        BankSet {
            particle: self.particle.as_ref().map(|b| b as &dyn Bank),
            calorimeter: self.calorimeter.as_ref().map(|b| b as &dyn Bank),
            cherenkov: self.cherenkov.as_ref().map(|b| b as &dyn Bank),
            traj: self.traj.as_ref().map(|b| b as &dyn Bank),
        }
    }

    /// Build every candidate of the event.
    pub fn candidates(&self, polarity: Polarity) -> Vec<Candidate> {
        let set = self.bank_set();
        (0..set.n_particles()).map(|i| Candidate::from_banks(i, set, polarity)).collect()
    }
}

impl Candidate {
    /// Gather the measurements of particle `index` from the event banks.
    ///
    /// Hit banks are matched on `pindex` and `detector`; for each calorimeter
    /// layer and DC region the first matching row is used. The trigger vertex
    /// is the vertex of particle row 0.
    pub fn from_banks(index: usize, banks: BankSet<'_>, polarity: Polarity) -> Candidate {
        let mut b = Candidate::builder(index).polarity(polarity);

        if let Some(rec) = banks.particle {
            b = b
                .pid(rec.int("pid", index))
                .charge(rec.int("charge", index))
                .status(rec.int("status", index))
                .momentum(rec.float("px", index), rec.float("py", index), rec.float("pz", index))
                .vz(rec.float("vz", index))
                .trigger_vz(rec.float("vz", 0))
                .beta(rec.float("beta", index))
                .chi2pid(rec.float("chi2pid", index));
        }

        if let Some(cc) = banks.cherenkov
            && let Some(&row) = cc.rows_for(index, detector::HTCC).first()
        {
            b = b.nphe(cc.float("nphe", row));
        }

        if let Some(cal) = banks.calorimeter {
            let rows = cal.rows_for(index, detector::ECAL);
            let layer_row =
                |layer: i64| rows.iter().copied().find(|&i| cal.int("layer", i) == Some(layer));
            if let Some(i) = layer_row(ecal_layer::PCAL) {
                let sector = cal.int("sector", i);
                if let Some(s) = sector
                    && !(1..=6).contains(&s)
                {
                    log::warn!("particle {index}: PCAL row {i} has invalid sector {s}");
                }
                b = b
                    .pcal_sector(sector)
                    .pcal_energy(cal.float("energy", i))
                    .pcal_vw(cal.float("lv", i), cal.float("lw", i));
            }
            if let Some(i) = layer_row(ecal_layer::ECIN) {
                b = b.ecin_energy(cal.float("energy", i));
            }
            if let Some(i) = layer_row(ecal_layer::ECOUT) {
                b = b.ecout_energy(cal.float("energy", i));
            }
            log::trace!("particle {index}: {} ECAL rows", rows.len());
        }

        if let Some(traj) = banks.traj {
            let rows = traj.rows_for(index, detector::DC);
            for region in DcRegion::ALL {
                let found = rows.iter().copied().find(|&i| {
                    traj.int("layer", i).and_then(DcRegion::from_traj_layer) == Some(region)
                });
                if let Some(i) = found {
                    b = b.dc_point(
                        region,
                        traj.float("x", i),
                        traj.float("y", i),
                        traj.float("z", i),
                    );
                }
            }
        }

        b.build()
    }
}
