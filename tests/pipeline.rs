//! End-to-end pipeline tests driving encoded image bytes through
//! decode -> operation -> PNG encode.

use image_transformer::{TransformError, pipeline};
use serde_json::{Map, Value, json};

/// Encodes raw RGBA pixels as a PNG the way a client upload would arrive.
fn png_bytes(width: u32, height: u32, pixels: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, pixels).expect("bad test pixels");
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("png encode");
    out.into_inner()
}

fn decode_png(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let img = image::load_from_memory(bytes).expect("png decode").to_rgba8();
    let (w, h) = img.dimensions();
    (w, h, img.into_raw())
}

fn params(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn invert_end_to_end() {
    let input = png_bytes(
        2,
        2,
        vec![
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 255, 255,
        ],
    );

    let output = pipeline::run(&input, "invert", &Map::new()).unwrap();
    assert_eq!(output.width, 2);
    assert_eq!(output.height, 2);

    let (w, h, pixels) = decode_png(&output.png);
    assert_eq!((w, h), (2, 2));
    assert_eq!(
        pixels,
        vec![
            0, 255, 255, 255, //
            255, 0, 255, 255, //
            255, 255, 0, 255, //
            0, 0, 0, 255,
        ]
    );
}

#[test]
fn unknown_operation_reports_allowed_names() {
    let input = png_bytes(1, 1, vec![0, 0, 0, 255]);
    let err = pipeline::run(&input, "swirl", &Map::new()).unwrap_err();
    match err {
        TransformError::UnknownOperation { name, allowed } => {
            assert_eq!(name, "swirl");
            assert!(allowed.contains(&"invert"));
            assert!(allowed.contains(&"crop"));
            let mut sorted = allowed.clone();
            sorted.sort_unstable();
            assert_eq!(allowed, sorted);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn garbage_bytes_fail_decode() {
    let err = pipeline::run(b"not an image", "invert", &Map::new()).unwrap_err();
    assert!(matches!(err, TransformError::Decode(_)));
}

#[test]
fn crop_changes_output_dimensions() {
    let pixels = vec![128u8; 100 * 100 * 4];
    let input = png_bytes(100, 100, pixels);

    let output = pipeline::run(
        &input,
        "crop",
        &params(json!({ "x": 10, "y": 10, "width": 50, "height": 50 })),
    )
    .unwrap();

    assert_eq!(output.width, 50);
    assert_eq!(output.height, 50);
    let (w, h, _) = decode_png(&output.png);
    assert_eq!((w, h), (50, 50));
}

#[test]
fn malformed_params_fall_back_to_defaults() {
    let pixels = vec![77u8, 77, 77, 255];
    let input = png_bytes(1, 1, pixels.clone());

    // brightness default is 0, so a garbage factor yields the identity
    let output = pipeline::run(
        &input,
        "brightness",
        &params(json!({ "factor": "shiny", "bogus": 3 })),
    )
    .unwrap();

    let (_, _, out_pixels) = decode_png(&output.png);
    assert_eq!(out_pixels, pixels);
}

#[test]
fn timings_are_reported_per_stage() {
    let input = png_bytes(8, 8, vec![10u8; 8 * 8 * 4]);
    let output = pipeline::run(&input, "blur", &params(json!({ "radius": 2 }))).unwrap();

    assert!(output.timings.decode_ms >= 0.0);
    assert!(output.timings.transform_ms >= 0.0);
    assert!(output.timings.encode_ms >= 0.0);
}

#[test]
fn grayscale_via_pipeline_equalizes_channels() {
    let input = png_bytes(2, 1, vec![200, 40, 90, 255, 0, 0, 0, 17]);
    let output = pipeline::run(&input, "grayscale", &Map::new()).unwrap();
    let (_, _, pixels) = decode_png(&output.png);
    for px in pixels.chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }
    // Alpha preserved
    assert_eq!(pixels[7], 17);
}
