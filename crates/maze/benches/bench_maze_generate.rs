use std::hint::black_box;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use reindeer_common::Cell;
use reindeer_maze::generate;

fn bench_generate(size: u32, iterations: usize) {
    let centre = Cell::new(size as i32 / 2, size as i32 / 2);
    let mut rng = StdRng::seed_from_u64(42);

    let start = Instant::now();
    let mut open = 0;
    for _ in 0..iterations {
        let grid = generate(black_box(size), black_box(size), centre, &mut rng)
            .expect("benchmark dimensions are valid");
        open += grid.open_count();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  generate ({size}x{size}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}, avg open {}",
        open / iterations
    );
}

fn main() {
    println!("reindeer-maze generation benchmarks");
    bench_generate(16, 1000);
    bench_generate(50, 200);
    bench_generate(200, 20);
    bench_generate(1000, 2);
}
