use criterion::{criterion_group, criterion_main, Criterion};
use perfect_maze::{
    cells::Cartesian2DCoordinate,
    connectivity,
    generators::{self, NeighbourSelection},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_uniform_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("uniform_backtracker_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker_with(32, &mut rng, NeighbourSelection::UniformAmongUnvisited))
    });
}

fn bench_shuffled_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("shuffled_backtracker_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker_with(32, &mut rng, NeighbourSelection::ShuffledDirections))
    });
}

fn bench_uniform_backtracker_maze_128(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(128);
    c.bench_function("uniform_backtracker_maze_128", move |b| {
        b.iter(|| generators::recursive_backtracker_with(128, &mut rng, NeighbourSelection::UniformAmongUnvisited))
    });
}

fn bench_shuffled_backtracker_maze_128(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(128);
    c.bench_function("shuffled_backtracker_maze_128", move |b| {
        b.iter(|| generators::recursive_backtracker_with(128, &mut rng, NeighbourSelection::ShuffledDirections))
    });
}

fn bench_distances_350(c: &mut Criterion) {
    c.bench_function("distances_350", |b| {
        let g = generators::generate(350, Some(350)).unwrap();
        let start_coord = Cartesian2DCoordinate::new(250, 250);
        b.iter(|| connectivity::Distances::new(&g, start_coord))
    });
}

fn bench_check_perfect_maze_350(c: &mut Criterion) {
    c.bench_function("check_perfect_maze_350", |b| {
        let g = generators::generate(350, Some(350)).unwrap();
        b.iter(|| connectivity::check_perfect_maze(&g))
    });
}

criterion_group!(
    benches,
    bench_uniform_backtracker_maze_32,
    bench_shuffled_backtracker_maze_32,
    bench_uniform_backtracker_maze_128,
    bench_shuffled_backtracker_maze_128,
    bench_distances_350,
    bench_check_perfect_maze_350
);
criterion_main!(benches);
