//! Integration tests for the qrpage HTTP API
//!
//! Builds the real router over an in-memory payload and the QR encoder, then
//! sends requests through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use qrpage_domain::paging::{
    PagingService, Payload, PayloadStore, SegmentResolver, SegmentSize,
};
use qrpage_qr::{ErrorCorrection, QrEncoderConfig, QrSegmentEncoder};
use qrpage_server::handlers::paging::{SEGMENT_COUNT_HEADER, SEGMENT_INDEX_HEADER};
use qrpage_server::{create_router, AppState};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Create a test app serving `data` in segments of `segment_size` bytes
fn test_app(data: &[u8], segment_size: usize) -> axum::Router {
    let store = PayloadStore::new(
        Payload::new(data.to_vec()),
        SegmentSize::new(segment_size).unwrap(),
    );
    let encoder = QrSegmentEncoder::new(QrEncoderConfig {
        error_correction: ErrorCorrection::Low,
        image_size: 256,
    });
    let service = PagingService::new(SegmentResolver::new(store), encoder).unwrap();

    create_router(AppState {
        paging_service: Arc::new(service),
    })
}

async fn get(app: axum::Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Helper to read response body as bytes
async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(body: Body) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

/// Decode the payload bytes carried by a QR code PNG
fn decode_qr(png: &[u8]) -> Vec<u8> {
    let image = image::load_from_memory(png).unwrap().to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| image.get_pixel(x as u32, y as u32)[0],
    );

    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1);

    let mut data = Vec::new();
    grids[0].decode_to(&mut data).unwrap();
    data
}

fn assert_no_cache<B>(resp: &Response<B>) {
    let headers = resp.headers();
    assert_eq!(
        headers[header::CACHE_CONTROL],
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");
}

// ---------------------------------------------------------------
// Health and viewer
// ---------------------------------------------------------------

#[tokio::test]
async fn test_health_check() {
    let resp = get(test_app(b"data", 4), "/health").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp.into_body()).await, b"OK");
}

#[tokio::test]
async fn test_index_page() {
    let resp = get(test_app(b"data", 4), "/").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_no_cache(&resp);
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = String::from_utf8(body_bytes(resp.into_body()).await).unwrap();
    assert!(body.contains("<html"));
    assert!(body.contains("/manifest"));
}

#[tokio::test]
async fn test_openapi_document() {
    let resp = get(test_app(b"data", 4), "/api-docs/openapi.json").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert!(json["paths"]["/{index}"].is_object());
    assert!(json["paths"]["/manifest"].is_object());
}

// ---------------------------------------------------------------
// Segments
// ---------------------------------------------------------------

#[tokio::test]
async fn test_segment_is_png_with_headers() {
    let resp = get(test_app(b"0123456789", 4), "/1").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_no_cache(&resp);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(resp.headers()[SEGMENT_INDEX_HEADER], "1");
    assert_eq!(resp.headers()[SEGMENT_COUNT_HEADER], "3");

    let body = body_bytes(resp.into_body()).await;
    assert!(body.starts_with(PNG_SIGNATURE));
}

#[tokio::test]
async fn test_every_segment_then_no_more_data() {
    let app = test_app(b"0123456789", 4);

    for n in 1..=3 {
        let resp = get(app.clone(), &format!("/{}", n)).await;
        assert_eq!(resp.status(), StatusCode::OK, "segment {} should be served", n);
        assert_eq!(resp.headers()[SEGMENT_INDEX_HEADER], n.to_string().as_str());
    }

    let resp = get(app, "/4").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_no_cache(&resp);

    let json = body_json(resp.into_body()).await;
    assert_eq!(json["code"], "no_more_data");
    assert!(json["error"].as_str().unwrap().contains("no more data"));
}

#[tokio::test]
async fn test_served_pages_reassemble_payload() {
    let payload = b"0123456789";
    let app = test_app(payload, 4);

    let mut reassembled = Vec::new();
    let mut parts = Vec::new();
    for n in 1..=3 {
        let resp = get(app.clone(), &format!("/{}", n)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let part = decode_qr(&body_bytes(resp.into_body()).await);
        reassembled.extend_from_slice(&part);
        parts.push(part);
    }

    assert_eq!(parts, [b"0123".to_vec(), b"4567".to_vec(), b"89".to_vec()]);
    assert_eq!(reassembled, payload);

    let resp = get(app, "/4").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["code"], "no_more_data");
}

#[tokio::test]
async fn test_empty_payload_has_no_segments() {
    let resp = get(test_app(b"", 4), "/1").await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["code"], "no_more_data");
}

#[tokio::test]
async fn test_index_below_one_is_out_of_range() {
    let app = test_app(b"0123456789", 4);

    for uri in ["/0", "/-1", "/-250"] {
        let resp = get(app.clone(), uri).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let json = body_json(resp.into_body()).await;
        assert_eq!(json["code"], "index_out_of_range", "{}", uri);
    }
}

#[tokio::test]
async fn test_non_numeric_index_is_invalid() {
    let app = test_app(b"0123456789", 4);

    for uri in ["/abc", "/1.5", "/0x1", "/+5"] {
        let resp = get(app.clone(), uri).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let json = body_json(resp.into_body()).await;
        assert_eq!(json["code"], "invalid_index", "{}", uri);
    }
}

#[tokio::test]
async fn test_same_segment_is_identical() {
    let app = test_app(b"the quick brown fox jumps over the lazy dog", 8);

    let first = body_bytes(get(app.clone(), "/3").await.into_body()).await;
    let second = body_bytes(get(app, "/3").await.into_body()).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_requests() {
    let data: Vec<u8> = (0..=255).collect();
    let app = test_app(&data, 16);

    let mut handles = Vec::new();
    for n in 1..=16 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let resp = get(app, &format!("/{}", n)).await;
            resp.status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let resp = get(app, "/17").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------

#[tokio::test]
async fn test_manifest() {
    let resp = get(test_app(b"0123456789", 4), "/manifest").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_no_cache(&resp);

    let json = body_json(resp.into_body()).await;
    assert_eq!(json["length"], 10);
    assert_eq!(json["segment_size"], 4);
    assert_eq!(json["segment_count"], 3);
    assert_eq!(json["content_type"], "image/png");
    assert!(json["loaded_at"].is_string());
}
