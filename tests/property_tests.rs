use std::io::Cursor;

use arcoder::{FrequencyModel, RangeDecoder, RangeEncoder};
use proptest::prelude::*;

const EOT: u8 = 0x04;

fn uniform_model() -> FrequencyModel {
    let mut m = FrequencyModel::new();
    for s in 0..=255u8 {
        m.update(s).unwrap();
    }
    m
}

proptest! {
    // Adaptive driver, stop condition carried out of band as a symbol count.
    #[test]
    fn adaptive_roundtrip_length_stopped(
        input in prop::collection::vec(any::<u8>(), 0..2000),
    ) {
        let mut model = uniform_model();
        let mut enc = RangeEncoder::new(Vec::new());
        for &b in &input {
            enc.encode(&mut model, b).unwrap();
            model.update(b).unwrap();
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
        prop_assert_eq!(input, out);
    }

    // Adaptive driver, stop condition carried in band as an EOT terminator.
    #[test]
    fn adaptive_roundtrip_terminator_stopped(
        input in prop::collection::vec(any::<u8>().prop_filter("payload avoids EOT", |b| *b != EOT), 0..1000),
    ) {
        let mut model = uniform_model();
        let mut enc = RangeEncoder::new(Vec::new());
        for &b in &input {
            enc.encode(&mut model, b).unwrap();
            model.update(b).unwrap();
        }
        enc.encode(&mut model, EOT).unwrap();
        let (_, coded) = enc.finish().unwrap();

        let mut model = uniform_model();
        let mut dec = RangeDecoder::new(Cursor::new(&coded)).unwrap();
        let mut out = Vec::with_capacity(input.len());
        loop {
            let sym = dec.decode(&mut model).unwrap();
            if sym == EOT {
                break;
            }
            model.update(sym).unwrap();
            out.push(sym);
        }
        prop_assert_eq!(input, out);
    }

    // Static driver: the model is counted up front, serialized ahead of the
    // payload, and counted back down on both sides; decoding stops when the
    // imported total runs out.
    #[test]
    fn perfect_roundtrip_with_exported_model(
        input in prop::collection::vec(any::<u8>(), 1..1500),
    ) {
        let mut model = FrequencyModel::new();
        for &b in &input {
            model.update(b).unwrap();
        }

        let mut payload = Vec::new();
        model.export(&mut payload).unwrap();

        let mut enc = RangeEncoder::new(payload);
        for &b in &input {
            enc.encode(&mut model, b).unwrap();
            model.update_by(b, -1).unwrap();
        }
        prop_assert_eq!(model.total(), 0);
        let (_, payload) = enc.finish().unwrap();

        let mut cursor = Cursor::new(&payload);
        let mut model = FrequencyModel::new();
        model.import(&mut cursor).unwrap();
        let expected = model.total() as usize;
        prop_assert_eq!(expected, input.len());

        let mut dec = RangeDecoder::new(cursor).unwrap();
        let mut out = Vec::with_capacity(expected);
        for _ in 0..expected {
            let sym = dec.decode(&mut model).unwrap();
            model.update_by(sym, -1).unwrap();
            out.push(sym);
        }
        prop_assert_eq!(input, out);
        prop_assert_eq!(model.total(), 0);
    }
}
