use criterion::{Criterion, criterion_group, criterion_main};
use kauri::generate::random_bifurcating;
use kauri::layout::{LayoutStyle, Orientation};
use kauri::query::Selector;

const TREE_SIZES: &[(&str, usize)] = &[("n50", 50), ("n500", 500), ("n5000", 5000)];

const SEED: u64 = 1848;

fn layout_benches(c: &mut Criterion) {
    for (name, num_tips) in TREE_SIZES {
        let tree = random_bifurcating(*num_tips, SEED).unwrap();
        c.bench_function(&format!("layout-rect-{}", name), |b| {
            b.iter(|| tree.layout(LayoutStyle::default()));
        });
        c.bench_function(&format!("layout-unrooted-{}", name), |b| {
            b.iter(|| {
                tree.layout(LayoutStyle {
                    orientation: Orientation::Unrooted,
                    use_branch_lengths: true,
                })
            });
        });
    }
}

fn edit_benches(c: &mut Criterion) {
    for (name, num_tips) in TREE_SIZES {
        let tree = random_bifurcating(*num_tips, SEED).unwrap();
        let outgroup = Selector::name("t-0");
        c.bench_function(&format!("ladderize-{}", name), |b| {
            b.iter(|| tree.ladderize(true).unwrap());
        });
        c.bench_function(&format!("root-{}", name), |b| {
            b.iter(|| tree.root(&outgroup).unwrap());
        });
    }
}

fn mad_benches(c: &mut Criterion) {
    // MAD is quadratic in the tip count, so keep the inputs small.
    for (name, num_tips) in &[("n50", 50usize), ("n200", 200)] {
        let tree = random_bifurcating(*num_tips, SEED).unwrap();
        c.bench_function(&format!("mad-{}", name), |b| {
            b.iter(|| tree.root_on_mad().unwrap());
        });
    }
}

criterion_group!(fast, layout_benches, edit_benches);
criterion_group! {
    name = slow;
    config = Criterion::default().sample_size(10);
    targets = mad_benches
}
criterion_main!(fast, slow);
