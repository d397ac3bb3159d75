use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stega::codec::{self, decoder, encoder};

fn gen_data(size: usize, seed: u64) -> Vec<u8> {
    let mut s = seed;
    let mut out = Vec::with_capacity(size);
    for _ in 0..size {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        out.push((s >> 33) as u8);
    }
    out
}

fn gen_text(chars: usize) -> String {
    (0..chars).map(|i| char::from(b'a' + (i % 26) as u8)).collect()
}

fn bench_encode_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("encode_chars");
    for chars in [64usize, 4096, 256 * 1024] {
        let carrier = gen_data(codec::required_len(chars), 1);
        let text = gen_text(chars);
        g.throughput(Throughput::Elements(chars as u64));
        g.bench_with_input(BenchmarkId::from_parameter(chars), &chars, |b, _| {
            let mut buf = carrier.clone();
            b.iter(|| {
                encoder::encode_in_place(black_box(&mut buf), black_box(&text)).unwrap();
            });
        });
    }
    g.finish();
}

fn bench_decode_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("decode_chars");
    for chars in [64usize, 4096, 256 * 1024] {
        let mut carrier = gen_data(codec::required_len(chars), 2);
        encoder::encode_in_place(&mut carrier, &gen_text(chars)).unwrap();
        g.throughput(Throughput::Elements(chars as u64));
        g.bench_with_input(BenchmarkId::from_parameter(chars), &chars, |b, _| {
            b.iter(|| {
                let out = decoder::decode(black_box(&carrier)).unwrap();
                black_box(out);
            });
        });
    }
    g.finish();
}

fn bench_copying_encode(c: &mut Criterion) {
    // Small payload in a large carrier: dominated by the carrier clone.
    let mut g = c.benchmark_group("encode_copy_vs_in_place");
    let carrier = gen_data(8 * 1024 * 1024, 3);
    let text = gen_text(256);
    g.throughput(Throughput::Bytes(carrier.len() as u64));
    g.bench_function("copy", |b| {
        b.iter(|| {
            let out = encoder::encode(black_box(&text), black_box(&carrier)).unwrap();
            black_box(out);
        });
    });
    g.bench_function("in_place", |b| {
        let mut buf = carrier.clone();
        b.iter(|| {
            encoder::encode_in_place(black_box(&mut buf), black_box(&text)).unwrap();
        });
    });
    g.finish();
}

fn bench_header_peek(c: &mut Criterion) {
    let carrier = gen_data(1024 * 1024, 4);
    c.bench_function("inspect_header", |b| {
        b.iter(|| black_box(decoder::inspect(black_box(&carrier))));
    });
}

criterion_group!(
    benches,
    bench_encode_speed,
    bench_decode_speed,
    bench_copying_encode,
    bench_header_peek
);
criterion_main!(benches);
