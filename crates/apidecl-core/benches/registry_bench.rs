//! Criterion benchmarks for apidecl-core.
//!
//! - building the standard registry
//! - running every structural check over it
//! - canonical bundle encode/decode
//! - validating a list page against its declared result

use apidecl_core::formats::{decode_bundle, encode_bundle};
use apidecl_core::registry::SerializableRegistry;
use apidecl_core::wire::RoutePart;
use apidecl_core::{Validator, run_checks, standard_registry};
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

fn bench_build(c: &mut Criterion) {
    c.bench_function("standard_registry", |b| {
        b.iter(|| black_box(standard_registry().expect("declarations build")));
    });
}

fn bench_checks(c: &mut Criterion) {
    let registry = standard_registry().expect("declarations build");
    c.bench_function("run_checks", |b| {
        b.iter(|| black_box(run_checks(black_box(&registry))));
    });
}

fn bench_bundle(c: &mut Criterion) {
    let registry = standard_registry().expect("declarations build");
    let sr = SerializableRegistry::from(&registry);
    let bytes = encode_bundle(&sr).expect("encodes");

    c.bench_function("encode_bundle", |b| {
        b.iter(|| black_box(encode_bundle(black_box(&sr)).expect("encodes")));
    });
    c.bench_function("decode_bundle", |b| {
        b.iter(|| black_box(decode_bundle(black_box(&bytes)).expect("decodes")));
    });
}

fn bench_validate(c: &mut Criterion) {
    let registry = standard_registry().expect("declarations build");
    let request = json!({
        "id": "oaCAVmEyrqYnkZX9955Y",
        "url": "https://www.dropbox.com/request/oaCAVmEyrqYnkZX9955Y",
        "title": "Homework submission",
        "created": "2026-01-10T12:00:00Z",
        "is_open": true,
        "file_count": 3,
        "destination": "/File Requests/Homework",
    });
    let page = json!({
        "file_requests": vec![request; 100],
        "cursor": "AAEAAAB",
        "has_more": true,
    });

    c.bench_function("validate_list_page_100", |b| {
        let mut validator = Validator::new(&registry);
        b.iter(|| {
            black_box(
                validator
                    .validate_route("file_requests/list:2", RoutePart::Result, black_box(&page))
                    .expect("valid page"),
            )
        });
    });
}

criterion_group!(benches, bench_build, bench_checks, bench_bundle, bench_validate);
criterion_main!(benches);
