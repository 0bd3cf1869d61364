#[macro_use]
extern crate criterion;
use criterion::Criterion;

use mmr::{Hash, MmrAccumulator};

fn append_helper(n: usize, c: &mut Criterion) {
    let label = format!("Append {} leaves", n);

    c.bench_function(&label, move |b| {
        let leaves: Vec<Hash> = (0..n as u64)
            .map(|i| {
                let mut leaf = Hash::default();
                leaf[..8].copy_from_slice(&i.to_le_bytes());
                leaf
            })
            .collect();

        b.iter(|| {
            let mut mmr = MmrAccumulator::new();
            for leaf in leaves.iter() {
                mmr.append(*leaf);
            }
            mmr.root()
        })
    });
}

fn append_1024(c: &mut Criterion) {
    append_helper(1024, c);
}

fn append_65536(c: &mut Criterion) {
    append_helper(65536, c);
}

fn bag_peaks(c: &mut Criterion) {
    // Worst-case peak count: an all-ones leaf counter.
    let mut mmr = MmrAccumulator::new();
    for i in 0u32..((1 << 16) - 1) {
        let mut leaf = Hash::default();
        leaf[..4].copy_from_slice(&i.to_le_bytes());
        mmr.append(leaf);
    }

    c.bench_function("Bag peaks of 2^16-1 leaves", move |b| b.iter(|| mmr.root()));
}

criterion_group!(mmr_benches, append_1024, append_65536, bag_peaks);
criterion_main!(mmr_benches);
