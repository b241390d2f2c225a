//! Benchmarks for zumolink command encoding and reply decoding

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zumolink::protocol::{decode_int16_triple, encode_command, Command, Level};

fn codec_benchmarks(c: &mut Criterion) {
    c.bench_function("encode_set_speeds", |b| {
        let cmd = Command::SetSpeeds {
            left: 300,
            right: -300,
        };
        b.iter(|| encode_command(black_box(&cmd)))
    });

    c.bench_function("encode_forward", |b| {
        let cmd = Command::Forward(Level::DEFAULT_SPEED);
        b.iter(|| encode_command(black_box(&cmd)))
    });

    c.bench_function("decode_gyro", |b| {
        let reply = [0x00, 0x01, 0x00, 0x02, 0x00, 0x03];
        b.iter(|| decode_int16_triple(black_box(&reply)))
    });
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
