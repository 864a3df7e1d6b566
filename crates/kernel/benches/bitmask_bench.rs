use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use csl_kernel::bitmask::build_mask;
use csl_kernel::{compile_source, to_bytes};
use std::hint::black_box;

fn bench_build_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_mask");
    for (p, dim) in [(3u32, 3u32), (3, 6), (5, 5), (2, 12)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("f{}^{}", p, dim)),
            &(p, dim),
            |b, &(p, dim)| b.iter(|| build_mask(black_box(dim), black_box(p), |coords| coords[0] == 0)),
        );
    }
    group.finish();
}

fn bench_compile_and_encode(c: &mut Criterion) {
    let source = "psi :: f3^6\nv :: { x in f3^6 : x2 = 1 }\ngrad\nproject\ngoal\n";
    c.bench_function("compile_and_encode", |b| {
        b.iter(|| {
            let code = compile_source(black_box(source)).unwrap();
            black_box(to_bytes(&code))
        })
    });
}

criterion_group!(benches, bench_build_mask, bench_compile_and_encode);
criterion_main!(benches);
