use criterion::{criterion_group, criterion_main};

mod http;
mod modem;

criterion_group!(
    benches,
    modem::bench_classify,
    http::bench_extract_small_frame,
    http::bench_extract_large_body
);
criterion_main!(benches);
