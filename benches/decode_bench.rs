//! Decoder throughput benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use checkdef_core::{decode, parse_duration_literal};

fn bench_decode(c: &mut Criterion) {
    let primary = json!({
        "ID": "api-http",
        "Name": "api",
        "ServiceID": "api-1",
        "HTTP": "http://localhost:8080/health",
        "Header": {"Accept": ["application/json"]},
        "Interval": "10s",
        "Timeout": "1s",
        "DeregisterCriticalServiceAfter": "90m"
    });
    let alternate = json!({
        "name": "api",
        "service_id": "api-1",
        "args": ["/usr/local/bin/check", "--quiet"],
        "interval": 10_000_000_000i64,
        "tls_skip_verify": true,
        "deregister_critical_service_after": "1h30m"
    });

    c.bench_function("decode_primary", |b| b.iter(|| decode(black_box(&primary))));
    c.bench_function("decode_alternate", |b| b.iter(|| decode(black_box(&alternate))));
    c.bench_function("parse_duration_compound", |b| {
        b.iter(|| parse_duration_literal(black_box("2h45m30.5s")))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
