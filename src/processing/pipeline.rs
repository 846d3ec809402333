//! The transform pipeline: decode -> resolve -> apply -> encode, with
//! per-stage timing.

use std::time::Instant;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::codec;
use crate::utils::TransformResult;

use super::registry;

/// Wall-clock time spent in each pipeline stage, fractional milliseconds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageTimings {
    pub decode_ms: f64,
    pub transform_ms: f64,
    pub encode_ms: f64,
}

/// A finished transform: PNG bytes, output dimensions, stage timings.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timings: StageTimings,
}

/// Runs one transform to completion.
///
/// Each invocation is fully self-contained: it owns its pixel buffer and any
/// lookup tables, shares nothing mutable, and never suspends mid-operation.
/// Callers may run invocations on independent threads without coordination.
pub fn run(
    bytes: &[u8],
    operation: &str,
    raw_params: &Map<String, Value>,
) -> TransformResult<TransformOutput> {
    // Resolve before decoding so an unknown name fails without paying for a
    // decode. Resolution is not part of any timed stage.
    let descriptor = registry::resolve(operation)?;
    let params = registry::resolve_params(descriptor, raw_params);

    let started = Instant::now();
    let buffer = codec::decode(bytes)?;
    let decode_ms = elapsed_ms(started);

    let started = Instant::now();
    let buffer = descriptor.apply(buffer, &params);
    let transform_ms = elapsed_ms(started);

    let started = Instant::now();
    let png = codec::encode(&buffer)?;
    let encode_ms = elapsed_ms(started);

    debug!(
        "{operation}: {}x{} out, decode {decode_ms:.2}ms, transform {transform_ms:.2}ms, encode {encode_ms:.2}ms",
        buffer.width(),
        buffer.height()
    );

    Ok(TransformOutput {
        width: buffer.width(),
        height: buffer.height(),
        png,
        timings: StageTimings {
            decode_ms,
            transform_ms,
            encode_ms,
        },
    })
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
