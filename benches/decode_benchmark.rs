
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use swf_adpcm::{decode_adpcm_swf, CodeSize, DecoderOptions, Predictor};

const CODE_SIZES: [(CodeSize, u8); 4] = [
    (CodeSize::Bits2, 0),
    (CodeSize::Bits3, 1),
    (CodeSize::Bits4, 2),
    (CodeSize::Bits5, 3),
];

/// Returns a record of `packets` full packets with pseudo-random headers and codes.
///
/// Every 6-bit step index is valid, so any bytes after the selector decode without errors
/// as long as the record length matches whole packets.
fn synthetic_record(selector: u8, bits: u32, packets: u64) -> Vec<u8> {
    let total_bits = 2 + packets * (22 + 4095 * u64::from(bits));
    let len = usize::try_from(total_bits.div_ceil(8)).unwrap_or(0);
    let mut state = 0x2545_f491u32;
    let mut record: Vec<u8> = (0..len).map(|_| {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state.to_le_bytes()[0]
    }).collect();
    if let Some(first) = record.first_mut() {
        *first = (*first & 0x3f) | (selector << 6);
    }
    record
}

fn criterion_benchmark(c: &mut Criterion) {

    // predictor
    for (code_size, _) in CODE_SIZES {
        let name = format!("decode_predictor_{}bit", code_size.bits());
        c.bench_function(&name, |b| b.iter(|| {
            let mut predictor = Predictor::new(0, 0);
            // only the lowest bits are used by decode(), loop over [0, 255] so that the time
            // can be compared between code sizes
            for i in 0..=255 {
                black_box(predictor.decode(black_box(i), code_size));
            }
        }));
    }

    // whole record
    let mut group = c.benchmark_group("decode_adpcm_swf");
    for (code_size, selector) in CODE_SIZES {
        let record = synthetic_record(selector, code_size.bits(), 16);
        let mut samples: Vec<i16> = Vec::with_capacity(16 * 4096);
        group.throughput(Throughput::Elements(16 * 4096));
        group.bench_function(format!("{}bit", code_size.bits()), |b| b.iter(|| {
            samples.clear();
            let summary = decode_adpcm_swf(black_box(&record), &DecoderOptions::default(),
                &mut samples);
            black_box(summary.is_ok());
        }));
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
