use blobsplit::source::GenericSource;
use blobsplit::{hash_split, Config, RollingHash};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::io::Cursor;

fn rand_data(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.max(1);
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.push((state & 0xff) as u8);
    }
    out
}

fn bench_roll_byte(c: &mut Criterion) {
    const SIZE: usize = 128 * 1024;
    let data = rand_data(SIZE, 0x01020304);

    let mut group = c.benchmark_group("roll");
    group.throughput(Throughput::Bytes(SIZE as u64));

    group.bench_function("bup/byte_by_byte", |b| {
        let mut engine = blobsplit::Bup::new();
        b.iter(|| {
            for _ in 0..SIZE {
                engine.roll_byte(black_box(0));
            }
        });
    });

    group.bench_function("bup/all", |b| {
        let mut engine = blobsplit::Bup::new();
        b.iter(|| {
            engine.roll(black_box(&data));
            black_box(engine.digest());
        });
    });

    group.finish();
}

fn bench_chunking(c: &mut Criterion) {
    const SIZE: usize = 4 * 1024 * 1024;
    let data = rand_data(SIZE, 0xdead_beef);

    let mut group = c.benchmark_group("chunk");
    group.throughput(Throughput::Bytes(SIZE as u64));

    group.bench_function("hash_split/end_to_end", |b| {
        b.iter(|| {
            let source: Box<dyn blobsplit::source::Source> =
                Box::new(GenericSource::new(Cursor::new(data.clone())));
            let mut total = 0usize;
            for chunk in hash_split(vec![source], Config::default()) {
                total += chunk.expect("in-memory source never fails").len();
            }
            black_box(total)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_roll_byte, bench_chunking);
criterion_main!(benches);
