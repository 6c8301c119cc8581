//! Whole-event classification.
//!
//! Builds every candidate of an event from its banks and runs all four
//! species chains on each. Particles are independent, so both the
//! per-event and the multi-event entry points fan out with Rayon.

use pid_core::{Polarity, Species};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bank::{BankSet, EventBanks};
use crate::candidate::Candidate;
use crate::chain;
use crate::config::CutConfig;

/// Chain verdicts for one particle row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Particle row in `REC::Particle`.
    pub index: usize,
    /// Full electron chain.
    pub electron: bool,
    /// Full proton chain.
    pub proton: bool,
    /// Full kaon chain (either charge).
    pub kaon: bool,
    /// Full photon chain.
    pub photon: bool,
}

impl Classification {
    /// Run every chain on one candidate.
    pub fn of(candidate: &Candidate, config: &CutConfig) -> Self {
        Self {
            index: candidate.index(),
            electron: chain::is_electron(candidate, config),
            proton: chain::is_proton(candidate, config),
            kaon: chain::is_kaon(candidate, config),
            photon: chain::is_photon(candidate, config),
        }
    }

    /// Verdict of one species chain.
    pub fn accepts(&self, species: Species) -> bool {
        match species {
            Species::Electron => self.electron,
            Species::Proton => self.proton,
            Species::Kaon => self.kaon,
            Species::Photon => self.photon,
        }
    }

    /// Species whose chain accepted, in [`Species::ALL`] order.
    pub fn species(&self) -> Vec<Species> {
        Species::ALL.into_iter().filter(|&s| self.accepts(s)).collect()
    }
}

/// Classify every particle of one event, in particle-row order.
pub fn classify_event(
    banks: BankSet<'_>,
    polarity: Polarity,
    config: &CutConfig,
) -> Vec<Classification> {
    let out: Vec<Classification> = (0..banks.n_particles())
        .into_par_iter()
        .map(|i| Classification::of(&Candidate::from_banks(i, banks, polarity), config))
        .collect();

    if log::log_enabled!(log::Level::Debug) {
        let count = |s: Species| out.iter().filter(|c| c.accepts(s)).count();
        log::debug!(
            "classified {} particles: e={} p={} K={} gamma={}",
            out.len(),
            count(Species::Electron),
            count(Species::Proton),
            count(Species::Kaon),
            count(Species::Photon)
        );
    }
    out
}

/// Classify a batch of events. The outer vector follows `events`.
pub fn classify_events(
    events: &[EventBanks],
    polarity: Polarity,
    config: &CutConfig,
) -> Vec<Vec<Classification>> {
    events.par_iter().map(|ev| classify_event(ev.bank_set(), polarity, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::ColumnBank;

    #[test]
    fn test_empty_event() {
        let out = classify_event(BankSet::default(), Polarity::Inbending, &CutConfig::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_rows_keep_order_and_reject_without_detectors() {
        let rec = ColumnBank::from_dense([
            ("pid", vec![11.0, 2212.0, 22.0, 321.0]),
            ("status", vec![-2000.0, 2000.0, 2000.0, 2000.0]),
        ])
        .unwrap();
        let set = BankSet { particle: Some(&rec), ..Default::default() };
        let out = classify_event(set, Polarity::Inbending, &CutConfig::default());
        assert_eq!(out.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!(out.iter().all(|c| c.species().is_empty()));
    }

    #[test]
    fn test_batch_matches_single() {
        let ev = EventBanks::from_json(
            r#"{"REC::Particle": {"pid": [22, 22], "status": [2100, 1100], "beta": [1.0, 1.0]}}"#,
        )
        .unwrap();
        let cfg = CutConfig::default();
        let batch = classify_events(&[ev.clone(), EventBanks::default()], Polarity::Outbending, &cfg);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], classify_event(ev.bank_set(), Polarity::Outbending, &cfg));
        assert!(batch[1].is_empty());
    }
}
