//! Classification of a JSON-encoded event through the public API.

use approx::assert_relative_eq;
use pid_core::{Polarity, Species};
use pid_cuts::{
    Classification, CutConfig, DcRegion, ElectronCut, EventBanks, Sector, classify_event,
    classify_events, failures,
};
use std::path::PathBuf;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn load_event() -> EventBanks {
    let text = std::fs::read_to_string(fixture("event.json")).unwrap();
    EventBanks::from_json(&text).unwrap()
}

fn expected() -> Vec<Classification> {
    vec![
        Classification { index: 0, electron: true, ..Default::default() },
        Classification { index: 1, proton: true, ..Default::default() },
        Classification { index: 2, photon: true, ..Default::default() },
        Classification { index: 3, ..Default::default() },
    ]
}

#[test]
fn candidates_from_fixture() {
    init_logger();
    let ev = load_event();
    let cands = ev.candidates(Polarity::Inbending);
    assert_eq!(cands.len(), 4);

    let e = &cands[0];
    assert_relative_eq!(e.p().unwrap(), 2.0, epsilon = 1e-6);
    assert_relative_eq!(e.nphe().unwrap(), 14.2, epsilon = 1e-5);
    assert_eq!(e.pcal_sector(), Sector::new(1));
    assert_eq!(e.dc_sector(), Sector::new(1));
    assert_eq!(e.dvz(), Some(0.0));

    let p = &cands[1];
    assert_eq!(p.dc_sector(), Sector::new(2));
    assert_relative_eq!(p.dvz().unwrap(), 0.5, epsilon = 1e-6);
    assert!(p.pcal_sector().is_none());
    assert_relative_eq!(p.ecin_energy(), 0.05, epsilon = 1e-6);

    // Invalid PCAL sector and incomplete momentum stay absent.
    let pion = &cands[3];
    assert_eq!(pion.pcal_sector(), None);
    assert!(pion.pcal_energy().is_some());
    assert_eq!(pion.p(), None);
    assert!(pion.dc_point(DcRegion::R1).xyz().is_none());
}

#[test]
fn classify_both_polarities() {
    init_logger();
    let ev = load_event();
    let cfg = CutConfig::default();
    for polarity in [Polarity::Inbending, Polarity::Outbending] {
        assert_eq!(classify_event(ev.bank_set(), polarity, &cfg), expected(), "{polarity:?}");
    }
}

#[test]
fn classify_batch() {
    init_logger();
    let ev = load_event();
    let batch = classify_events(&[ev.clone(), ev], Polarity::Inbending, &CutConfig::default());
    assert_eq!(batch, vec![expected(), expected()]);
    assert_eq!(batch[0][0].species(), vec![Species::Electron]);
}

#[test]
fn config_file_changes_photon_verdict() {
    init_logger();
    let cfg = CutConfig::from_path(fixture("tight_photon.json")).unwrap();
    let out = classify_event(load_event().bank_set(), Polarity::Inbending, &cfg);
    assert!(!out[2].photon);
    assert!(out[0].electron && out[1].proton);
}

#[test]
fn electron_row_without_calorimeter() {
    init_logger();
    let mut ev = load_event();
    ev.calorimeter = None;
    let cands = ev.candidates(Polarity::Inbending);
    let failed = failures::<ElectronCut>(&cands[0], &CutConfig::default());
    assert_eq!(
        failed,
        vec![ElectronCut::PcalFiducial, ElectronCut::Eieo, ElectronCut::Sampling]
    );
}
