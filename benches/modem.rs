use criterion::Criterion;
use espat::modem::CommandOutcome;
use std::hint::black_box;

pub fn bench_classify(c: &mut Criterion) {
    // A scan-sized reply where the terminator sits at the very end, the
    // worst case for the containment search.
    let mut reply = Vec::new();
    for i in 0..24 {
        reply.extend_from_slice(
            format!("+CWLAP:(3,\"network-{i}\",-70,\"aa:bb:cc:dd:ee:ff\",{i})\r\n").as_bytes(),
        );
    }
    reply.extend_from_slice(b"\r\nOK\r\n");

    c.bench_function("classify_scan_reply", |b| {
        b.iter(|| CommandOutcome::classify(black_box(&reply)))
    });
}
