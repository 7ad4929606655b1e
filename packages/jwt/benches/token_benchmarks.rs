//! Benchmarks for signing, verification and trusted decoding

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use realworld_jwt::{Claims, Header, decode_trusted, sign, verify};

fn claims_with_custom(count: usize) -> Claims {
    let mut claims = Claims::new();
    claims.set_subject("42").set_issuer("bench");
    for i in 0..count {
        claims.set(format!("claim_{i}"), format!("value_{i}"));
    }
    claims
}

fn benchmark_tokens(c: &mut Criterion) {
    let secret = b"benchmark-secret-benchmark-secret";
    let header = Header::default();
    let mut group = c.benchmark_group("token");

    for count in [0usize, 8, 64] {
        let claims = claims_with_custom(count);
        let compact = sign(&header, &claims, secret).unwrap();

        group.bench_with_input(BenchmarkId::new("sign", count), &claims, |b, claims| {
            b.iter(|| std::hint::black_box(sign(&header, claims, secret).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("verify", count), &compact, |b, compact| {
            b.iter(|| std::hint::black_box(verify(compact, secret).unwrap()));
        });

        group.bench_with_input(
            BenchmarkId::new("decode_trusted", count),
            &compact,
            |b, compact| {
                b.iter(|| std::hint::black_box(decode_trusted(compact, secret).unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_tokens);
criterion_main!(benches);
