#![no_main]
use std::io::Cursor;

use arcoder::{FrequencyModel, RangeDecoder, RangeEncoder};
use libfuzzer_sys::fuzz_target;

fn uniform_model() -> FrequencyModel {
    let mut m = FrequencyModel::new();
    for s in 0..=255u8 {
        m.update(s).unwrap();
    }
    m
}

fuzz_target!(|input: Vec<u8>| {
    if input.len() > 4096 {
        return;
    }

    let mut model = uniform_model();
    let mut enc = RangeEncoder::new(Vec::new());
    for &b in &input {
        if enc.encode(&mut model, b).is_err() {
            return;
        }
        if model.update(b).is_err() {
            return;
        }
    }
    let (_, coded) = enc.finish().unwrap();

    let mut model = uniform_model();
    let mut dec = RangeDecoder::new(Cursor::new(&coded)).unwrap();
    let mut out = Vec::with_capacity(input.len());
    for _ in 0..input.len() {
        let sym = dec.decode(&mut model).unwrap();
        model.update(sym).unwrap();
        out.push(sym);
    }

    assert_eq!(input, out);
});
