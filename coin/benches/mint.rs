use coin::{GroupParameters, PrivateCoin};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_mint(c: &mut Criterion) {
    let params = GroupParameters::demo().expect("demo parameters");
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("coin_mint", |bencher| {
        bencher.iter(|| {
            let coin = PrivateCoin::mint(&params, &mut rng);
            black_box(coin.public_coin(&params));
        })
    });
}

fn bench_open(c: &mut Criterion) {
    let params = GroupParameters::demo().expect("demo parameters");
    let mut rng = StdRng::seed_from_u64(42);
    let coin = PrivateCoin::mint(&params, &mut rng);
    let public = coin.public_coin(&params);

    c.bench_function("coin_open", |bencher| {
        bencher.iter(|| black_box(public.opens_to(black_box(&params), black_box(&coin))))
    });
}

criterion_group!(benches, bench_mint, bench_open);
criterion_main!(benches);
