use std::hint::black_box;

use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use http::StatusCode;
use micro_headers::codec::{HeaderDecoder, HeaderEncoder};
use micro_headers::header::{FieldValues, RequestHeaders, final_transfer_coding, parse_connection};
use micro_headers::protocol::{PayloadSize, ResponseHead};
use tokio_util::codec::{Decoder, Encoder};

const BROWSER_REQUEST: &[u8] = b"GET /index/?a=1&b=2 HTTP/1.1\r\n\
Host: 127.0.0.1:8080\r\n\
Connection: keep-alive\r\n\
Cache-Control: max-age=0\r\n\
sec-ch-ua: \"Chromium\";v=\"109\"\r\n\
Upgrade-Insecure-Requests: 1\r\n\
User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36\r\n\
Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8\r\n\
Sec-Fetch-Site: none\r\n\
Accept-Encoding: gzip, deflate, br\r\n\
Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7\r\n\r\n";

fn bench_collection(c: &mut Criterion) {
    let mut headers = RequestHeaders::new();

    c.bench_function("append_known_and_unknown", |b| {
        b.iter(|| {
            headers.reset();
            headers.append("Host", "localhost").unwrap();
            headers.append("Accept", "*/*").unwrap();
            headers.append("X-Request-Id", "42").unwrap();
            headers.append("Content-Length", "128").unwrap();
            black_box(headers.count());
        });
    });

    c.bench_function("get_known_header", |b| {
        b.iter(|| black_box(headers.get(black_box("host")).len()));
    });

    c.bench_function("get_unknown_header", |b| {
        b.iter(|| black_box(headers.get(black_box("x-request-id")).len()));
    });
}

fn bench_scanners(c: &mut Criterion) {
    let connection = FieldValues::from("keep-alive, Upgrade");
    let transfer_encoding = FieldValues::from(["gzip", "chunked"]);

    c.bench_function("parse_connection", |b| {
        b.iter(|| black_box(parse_connection(black_box(&connection))));
    });

    c.bench_function("final_transfer_coding", |b| {
        b.iter(|| black_box(final_transfer_coding(black_box(&transfer_encoding))));
    });
}

fn bench_codec(c: &mut Criterion) {
    c.bench_function("decode_browser_request", |b| {
        b.iter(|| {
            let mut decoder = HeaderDecoder::new();
            let mut bytes = BytesMut::from(BROWSER_REQUEST);
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });

    let mut response = ResponseHead::new(StatusCode::OK);
    response.headers_mut().set("Content-Type", "text/plain; charset=utf-8").unwrap();
    response.headers_mut().set("Server", "micro").unwrap();

    c.bench_function("encode_simple_response", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::new();
            HeaderEncoder.encode((response.clone(), PayloadSize::Length(12)), &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

criterion_group!(benches, bench_collection, bench_scanners, bench_codec);
criterion_main!(benches);
