//! Operation registry: the name -> descriptor table plus parameter
//! resolution.
//!
//! The table is built once and read-only afterwards; it is the only shared
//! resource in the engine. Parameter resolution is deliberately lenient:
//! missing or non-numeric values fall back to the declared default instead
//! of rejecting the request, and unknown keys are ignored. Declared min/max
//! exist for UI generation only and are not enforced here; the handful of
//! division-by-zero-prone operations clamp internally.

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::Value;

use crate::core::PixelBuffer;
use crate::utils::{TransformError, TransformResult};

use super::{color, convolution, geometric, quantization};

/// Declared schema of one numeric parameter, used for resolution defaults
/// and for UI generation via `/api/operations`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

/// Parameters after resolution: every declared name maps to a finite value.
#[derive(Debug, Default)]
pub struct ResolvedParams(HashMap<&'static str, f64>);

impl ResolvedParams {
    /// Looks up a parameter by name, falling back if it was never declared.
    pub fn get(&self, name: &str, fallback: f64) -> f64 {
        self.0.get(name).copied().unwrap_or(fallback)
    }
}

type ApplyFn = fn(PixelBuffer, &ResolvedParams) -> PixelBuffer;

/// A registered operation: unique name, parameter schema, implementation.
#[derive(Debug)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
    run: ApplyFn,
}

impl OperationDescriptor {
    /// Invokes the operation. Consumes the input buffer; most operations
    /// mutate and return it, crop returns a freshly allocated one.
    pub fn apply(&self, buffer: PixelBuffer, params: &ResolvedParams) -> PixelBuffer {
        (self.run)(buffer, params)
    }
}

const FACTOR: &[ParamSpec] = &[ParamSpec {
    name: "factor",
    min: -100.0,
    max: 100.0,
    step: 1.0,
    default: 0.0,
}];

const RADIUS: &[ParamSpec] = &[ParamSpec {
    name: "radius",
    min: 1.0,
    max: 5.0,
    step: 1.0,
    default: 1.0,
}];

const THRESHOLD: &[ParamSpec] = &[ParamSpec {
    name: "value",
    min: 0.0,
    max: 255.0,
    step: 1.0,
    default: 128.0,
}];

const LEVELS: &[ParamSpec] = &[ParamSpec {
    name: "levels",
    min: 2.0,
    max: 16.0,
    step: 1.0,
    default: 4.0,
}];

const GAMMA: &[ParamSpec] = &[ParamSpec {
    name: "value",
    min: 0.1,
    max: 3.0,
    step: 0.1,
    default: 1.0,
}];

const CROP: &[ParamSpec] = &[
    ParamSpec {
        name: "x",
        min: 0.0,
        max: 90.0,
        step: 1.0,
        default: 0.0,
    },
    ParamSpec {
        name: "y",
        min: 0.0,
        max: 90.0,
        step: 1.0,
        default: 0.0,
    },
    ParamSpec {
        name: "width",
        min: 10.0,
        max: 100.0,
        step: 1.0,
        default: 100.0,
    },
    ParamSpec {
        name: "height",
        min: 10.0,
        max: 100.0,
        step: 1.0,
        default: 100.0,
    },
];

lazy_static! {
    static ref OPERATIONS: BTreeMap<&'static str, OperationDescriptor> = {
        let descriptors = [
            // Color family
            OperationDescriptor {
                name: "grayscale",
                params: &[],
                run: |buf, _| color::grayscale(buf),
            },
            OperationDescriptor {
                name: "invert",
                params: &[],
                run: |buf, _| color::invert(buf),
            },
            OperationDescriptor {
                name: "sepia",
                params: &[],
                run: |buf, _| color::sepia(buf),
            },
            OperationDescriptor {
                name: "brightness",
                params: FACTOR,
                run: |buf, p| color::brightness(buf, p.get("factor", 0.0)),
            },
            OperationDescriptor {
                name: "contrast",
                params: FACTOR,
                run: |buf, p| color::contrast(buf, p.get("factor", 0.0)),
            },
            OperationDescriptor {
                name: "saturation",
                params: FACTOR,
                run: |buf, p| color::saturation(buf, p.get("factor", 0.0)),
            },
            // Geometric family
            OperationDescriptor {
                name: "flipHorizontal",
                params: &[],
                run: |buf, _| geometric::flip_horizontal(buf),
            },
            OperationDescriptor {
                name: "flipVertical",
                params: &[],
                run: |buf, _| geometric::flip_vertical(buf),
            },
            OperationDescriptor {
                name: "rotate180",
                params: &[],
                run: |buf, _| geometric::rotate180(buf),
            },
            OperationDescriptor {
                name: "crop",
                params: CROP,
                run: |buf, p| {
                    geometric::crop(
                        buf,
                        p.get("x", 0.0),
                        p.get("y", 0.0),
                        p.get("width", 100.0),
                        p.get("height", 100.0),
                    )
                },
            },
            // Convolution family
            OperationDescriptor {
                name: "blur",
                params: RADIUS,
                run: |buf, p| convolution::box_blur(buf, p.get("radius", 1.0)),
            },
            OperationDescriptor {
                name: "sharpen",
                params: &[],
                run: |buf, _| convolution::sharpen(buf),
            },
            OperationDescriptor {
                name: "edgeDetect",
                params: &[],
                run: |buf, _| convolution::edge_detect(buf),
            },
            // Quantization family
            OperationDescriptor {
                name: "threshold",
                params: THRESHOLD,
                run: |buf, p| quantization::threshold(buf, p.get("value", 128.0)),
            },
            OperationDescriptor {
                name: "posterize",
                params: LEVELS,
                run: |buf, p| quantization::posterize(buf, p.get("levels", 4.0)),
            },
            OperationDescriptor {
                name: "gamma",
                params: GAMMA,
                run: |buf, p| quantization::gamma(buf, p.get("value", 1.0)),
            },
        ];

        let mut table = BTreeMap::new();
        for descriptor in descriptors {
            table.insert(descriptor.name, descriptor);
        }
        table
    };
}

/// Looks up an operation by name.
pub fn resolve(name: &str) -> TransformResult<&'static OperationDescriptor> {
    OPERATIONS
        .get(name)
        .ok_or_else(|| TransformError::UnknownOperation {
            name: name.to_string(),
            allowed: operation_names(),
        })
}

/// All registered operation names, sorted.
pub fn operation_names() -> Vec<&'static str> {
    OPERATIONS.keys().copied().collect()
}

/// All registered descriptors in name order.
pub fn descriptors() -> impl Iterator<Item = &'static OperationDescriptor> {
    OPERATIONS.values()
}

/// Resolves raw JSON parameters against an operation's declared schema.
///
/// Numbers are taken as-is, numeric strings are parsed; anything else
/// (missing, null, non-numeric, non-finite) falls back to the declared
/// default. Never fails.
pub fn resolve_params(
    descriptor: &OperationDescriptor,
    raw: &serde_json::Map<String, Value>,
) -> ResolvedParams {
    let mut resolved = HashMap::with_capacity(descriptor.params.len());
    for spec in descriptor.params {
        let value = raw
            .get(spec.name)
            .and_then(coerce_number)
            .unwrap_or(spec.default);
        resolved.insert(spec.name, value);
    }
    ResolvedParams(resolved)
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
