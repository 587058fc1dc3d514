use std::io::Cursor;

use arcoder::{FrequencyModel, RangeDecoder, RangeEncoder};
use criterion::{criterion_group, criterion_main, Criterion};

fn uniform_model() -> FrequencyModel {
    let mut m = FrequencyModel::new();
    for s in 0..=255u8 {
        m.update(s).unwrap();
    }
    m
}

fn bench_adaptive(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptive");
    // Mildly skewed 1000-byte input so the model actually adapts.
    let input = (0..1000)
        .map(|i| if i % 7 == 0 { b'q' } else { b'a' + (i % 4) as u8 })
        .collect::<Vec<_>>();

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut model = uniform_model();
            let mut enc = RangeEncoder::new(Vec::new());
            for &byte in &input {
                enc.encode(&mut model, byte).unwrap();
                model.update(byte).unwrap();
            }
            enc.finish().unwrap()
        })
    });

    let mut model = uniform_model();
    let mut enc = RangeEncoder::new(Vec::new());
    for &byte in &input {
        enc.encode(&mut model, byte).unwrap();
        model.update(byte).unwrap();
    }
    let (_, coded) = enc.finish().unwrap();

    group.bench_function("decode", |b| {
        b.iter(|| {
            let mut model = uniform_model();
            let mut dec = RangeDecoder::new(Cursor::new(&coded)).unwrap();
            for _ in 0..input.len() {
                let sym = dec.decode(&mut model).unwrap();
                model.update(sym).unwrap();
            }
        })
    });
}

fn bench_static(c: &mut Criterion) {
    let mut group = c.benchmark_group("static");
    let input = (0..1000).map(|i| (i % 3) as u8).collect::<Vec<_>>();

    let mut model = FrequencyModel::new();
    for &byte in &input {
        model.update(byte).unwrap();
    }
    model.digest();

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut enc = RangeEncoder::new(Vec::new());
            for &byte in &input {
                enc.encode(&mut model, byte).unwrap();
            }
            enc.finish().unwrap()
        })
    });

    let mut enc = RangeEncoder::new(Vec::new());
    for &byte in &input {
        enc.encode(&mut model, byte).unwrap();
    }
    let (_, coded) = enc.finish().unwrap();

    group.bench_function("decode", |b| {
        b.iter(|| {
            let mut dec = RangeDecoder::new(Cursor::new(&coded)).unwrap();
            for _ in 0..input.len() {
                dec.decode(&mut model).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_adaptive, bench_static);
criterion_main!(benches);
