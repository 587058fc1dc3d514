use std::io::Cursor;

use arcoder::{FrequencyModel, RangeDecoder, RangeEncoder};

fn main() {
    let input = (0..10000)
        .map(|i| if i % 11 == 0 { b'!' } else { b'a' + (i % 5) as u8 })
        .collect::<Vec<_>>();

    for _ in 0..200 {
        let mut model = FrequencyModel::new();
        for s in 0..=255u8 {
            model.update(s).unwrap();
        }
        let mut enc = RangeEncoder::new(Vec::new());
        for &byte in &input {
            enc.encode(&mut model, byte).unwrap();
            model.update(byte).unwrap();
        }
        let (_, coded) = enc.finish().unwrap();

        let mut model = FrequencyModel::new();
        for s in 0..=255u8 {
            model.update(s).unwrap();
        }
        let mut dec = RangeDecoder::new(Cursor::new(&coded)).unwrap();
        for &expected in &input {
            let sym = dec.decode(&mut model).unwrap();
            assert_eq!(sym, expected);
            model.update(sym).unwrap();
        }
    }
}
