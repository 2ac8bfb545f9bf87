//! Throughput benchmarks for archive record framing.
//!
//! Measures raw framing (`WarcDecoder`) and full document mapping
//! (`WarcDocumentDecoder`) over an in-memory stream of synthetic responses.
//!
//! Run with:
//! ```bash
//! cargo bench --bench warc_decoder
//! ```

#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dredge_collection::{DecodeStep, Decoded};
use dredge_formats::{DecoderConfig, WarcDecoder, WarcDocumentDecoder, WarcFamily, WarcHeader, WarcRecord};
use std::hint::black_box;
use std::sync::Arc;

/// Build a stream of `count` response records with `payload_len` byte bodies.
fn synthetic_stream(count: usize, payload_len: usize) -> Vec<u8> {
    let body: Vec<u8> = b"<p>lorem ipsum dolor sit amet</p>\n"
        .iter()
        .copied()
        .cycle()
        .take(payload_len)
        .collect();
    let mut payload = b"HTTP/1.1 200 OK\nContent-Type: text/html\n\n<html>\n".to_vec();
    payload.extend_from_slice(&body);

    let mut stream = Vec::new();
    for i in 0..count {
        let header = WarcHeader::new("WARC/1.0")
            .with("WARC-Type", "response")
            .with("WARC-Target-URI", "http://example.com/")
            .with("WARC-TREC-ID", &format!("clueweb12-bench-{i:05}"));
        WarcRecord::new(header, payload.clone())
            .write_to(&mut stream)
            .expect("Writing to a Vec should succeed");
    }
    stream
}

fn bench_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("warc_framing");
    for payload_len in [512usize, 8 * 1024, 64 * 1024] {
        let stream = synthetic_stream(200, payload_len);
        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(payload_len),
            &stream,
            |b, stream| {
                b.iter(|| {
                    let decoder = WarcDecoder::new(&stream[..], DecoderConfig::default());
                    black_box(decoder.count())
                });
            },
        );
    }
    group.finish();
}

fn bench_documents(c: &mut Criterion) {
    let family = Arc::new(WarcFamily::clueweb12());
    let stream = synthetic_stream(200, 8 * 1024);

    let mut group = c.benchmark_group("warc_documents");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("clueweb12", |b| {
        b.iter(|| {
            let mut decoder = WarcDocumentDecoder::new(&stream[..], Arc::clone(&family));
            let mut produced = 0usize;
            while let Decoded::Produced(doc) = decoder.decode_next() {
                produced += black_box(doc).contents().len();
            }
            produced
        });
    });
    group.finish();
}

criterion_group!(benches, bench_framing, bench_documents);
criterion_main!(benches);
