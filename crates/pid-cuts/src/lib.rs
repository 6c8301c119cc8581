//! # pid-cuts
//!
//! Particle-identification cut chains for forward-detector reconstruction.
//!
//! A [`Candidate`] collects the measurements of one reconstructed particle
//! (momentum, vertex, calorimeter deposits, drift-chamber trajectory points).
//! Species chains ([`ElectronCut`], [`ProtonCut`], [`KaonCut`],
//! [`PhotonCut`]) are ordered lists of named predicates evaluated as a
//! short-circuit AND. A predicate whose inputs are missing rejects.
//!
//! ## Layout
//!
//! - [`geometry`]: sector lookup, sector-frame rotation, polar angles
//! - [`tables`]: calibration constants
//! - [`cuts`]: pure numeric predicates
//! - [`candidate`], [`bank`]: per-particle records and bank ingestion
//! - [`chain`]: species chains and named-cut selection
//! - [`classify`]: parallel whole-event classification

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bank;
pub mod candidate;
pub mod chain;
pub mod classify;
pub mod config;
pub mod cuts;
pub mod geometry;
pub mod tables;

pub use bank::{BankSet, ColumnBank, EventBanks};
pub use candidate::{Candidate, CandidateBuilder, TrajPoint};
pub use chain::{
    CutFn, ElectronCut, KaonCut, PhotonCut, ProtonCut, SpeciesCut, failures, first_failure,
    is_electron, is_kaon, is_kaon_minus, is_kaon_plus, is_photon, is_proton, passes, passes_all,
    passes_named, passes_species, try_passes_named,
};
pub use classify::{Classification, classify_event, classify_events};
pub use config::CutConfig;
pub use geometry::{DcRegion, PolarAngles, Sector};
