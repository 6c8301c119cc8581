use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pid_core::Polarity;
use pid_cuts::geometry::rotate_from_sector_frame;
use pid_cuts::{
    BankSet, Candidate, ColumnBank, CutConfig, DcRegion, Sector, classify_event, is_electron,
    is_proton,
};
use std::hint::black_box;

/// Candidates cycling through the six sectors, every field populated.
fn make_candidates(n: usize, polarity: Polarity) -> Vec<Candidate> {
    (0..n)
        .map(|i| {
            let sector = Sector::ALL[i % 6];
            let p = 1.0 + (i % 9) as f64 * 0.5;
            let (x, y) = rotate_from_sector_frame(150.0, ((i % 11) as f64 - 5.0) * 4.0, sector);
            let mut b = Candidate::builder(i)
                .polarity(polarity)
                .pid(Some(if i % 2 == 0 { 11 } else { 2212 }))
                .charge(Some(if i % 2 == 0 { -1 } else { 1 }))
                .status(Some(if i == 0 { -2000 } else { 2100 }))
                .momentum(Some(0.1), Some(0.05), Some(p))
                .vz(Some(-2.0 + (i % 5) as f64))
                .trigger_vz(Some(-2.0))
                .chi2pid(Some(((i % 7) as f64 - 3.0) * 0.6))
                .pcal_sector(Some(i64::from(sector.number())))
                .pcal_energy(Some(0.25 * p * 0.7))
                .ecin_energy(Some(0.25 * p * 0.3))
                .pcal_vw(Some(30.0), Some(30.0));
            for region in DcRegion::ALL {
                b = b.dc_point(region, Some(x), Some(y), Some(410.0));
            }
            b.build()
        })
        .collect()
}

fn bench_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("cut_chain");
    let cfg = CutConfig::default();

    for n in [64usize, 1024] {
        for polarity in [Polarity::Inbending, Polarity::Outbending] {
            let cands = make_candidates(n, polarity);
            let label = format!("{polarity:?}/{n}");
            group.bench_with_input(BenchmarkId::new("electron_proton", label), &cands, |b, cs| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for c in cs {
                        hits += is_electron(c, &cfg) as usize + is_proton(c, &cfg) as usize;
                    }
                    black_box(hits)
                })
            });
        }
    }

    group.finish();
}

fn bench_classify_event(c: &mut Criterion) {
    let n = 32usize;
    let col = |f: &dyn Fn(usize) -> f64| (0..n).map(f).collect::<Vec<f64>>();
    let particle = ColumnBank::from_dense([
        ("pid", col(&|i| if i % 3 == 0 { 11.0 } else { 2212.0 })),
        ("charge", col(&|i| if i % 3 == 0 { -1.0 } else { 1.0 })),
        ("status", col(&|i| if i == 0 { -2100.0 } else { 2100.0 })),
        ("px", col(&|i| 0.1 * (i % 4) as f64)),
        ("py", col(&|_| 0.05)),
        ("pz", col(&|i| 1.0 + (i % 5) as f64)),
        ("vz", col(&|i| -1.0 + (i % 3) as f64)),
        ("chi2pid", col(&|i| (i % 5) as f64 - 2.0)),
    ])
    .expect("valid bank");
    let banks = BankSet { particle: Some(&particle), ..Default::default() };
    let cfg = CutConfig::default();

    c.bench_function("classify_event/particle_only_32", |b| {
        b.iter(|| black_box(classify_event(black_box(banks), Polarity::Inbending, &cfg)))
    });
}

criterion_group!(benches, bench_chains, bench_classify_event);
criterion_main!(benches);
