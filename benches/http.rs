use criterion::Criterion;
use espat::http::extract;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

pub fn bench_extract_small_frame(c: &mut Criterion) {
    let frame = b"SEND OK\r\n\r\n+IPD,47:HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello";

    c.bench_function("extract_small_frame", |b| {
        b.iter(|| extract(black_box(frame)))
    });
}

pub fn bench_extract_large_body(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut frame = b"+IPD,1500:HTTP/1.1 200 OK\r\nContent-Length: 1500\r\n\r\n".to_vec();
    frame.extend((0..1500).map(|_| rng.gen_range(b' '..=b'~')));

    c.bench_function("extract_large_body", |b| {
        b.iter(|| extract(black_box(&frame)))
    });
}
