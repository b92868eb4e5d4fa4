#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;

use std::fmt;

use geom::{
    LineGeometry, Point3, RoundedCornerDiagnostics, RoundedCornerOptions, Tolerance,
    round_corners,
};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeometryExport {
    positions: Vec<f32>,
    vertex_count: usize,
    closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounding_box: Option<BoundsExport>,
    diagnostics: DiagnosticsExport,
}

#[derive(Debug, Serialize)]
struct BoundsExport {
    min: [f64; 3],
    max: [f64; 3],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosticsExport {
    corner_count: usize,
    rounded_corner_count: usize,
    skipped_corner_count: usize,
    clamped_corner_count: usize,
    max_radius: f64,
    warnings: Vec<String>,
}

impl From<RoundedCornerDiagnostics> for DiagnosticsExport {
    fn from(diag: RoundedCornerDiagnostics) -> Self {
        Self {
            corner_count: diag.corner_count,
            rounded_corner_count: diag.rounded_corner_count,
            skipped_corner_count: diag.skipped_corner_count,
            clamped_corner_count: diag.clamped_corner_count,
            max_radius: diag.max_radius,
            warnings: diag.warnings,
        }
    }
}

impl GeometryExport {
    fn new(geometry: LineGeometry, diagnostics: RoundedCornerDiagnostics) -> Self {
        let bounding_box = geometry.bounding_box().map(|bbox| BoundsExport {
            min: bbox.min.to_array(),
            max: bbox.max.to_array(),
        });
        Self {
            vertex_count: geometry.vertex_count(),
            closed: geometry.is_closed(),
            positions: geometry.into_positions(),
            bounding_box,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Round a polyline given as flat `[x0, y0, z0, x1, ...]` coordinates.
///
/// Returns the rounded polyline as a flat `Float32Array`, ready for a
/// `BufferGeometry` position attribute. `smoothness` is floored and defaults to 3;
/// `closed` defaults to `false`.
#[wasm_bindgen(js_name = roundedCornerLine)]
pub fn rounded_corner_line(
    points: &[f64],
    radiuses: &[f64],
    smoothness: Option<f64>,
    closed: Option<bool>,
) -> Result<Vec<f32>, JsValue> {
    let points = points_from_flat(points).map_err(|err| js_error(&err))?;
    let options = options_from_js(smoothness, closed).map_err(|err| js_error(&err))?;
    let (geometry, _) =
        geom::rounded_corner_geometry(&points, radiuses, options, Tolerance::default_geom())
            .map_err(to_js_error)?;
    Ok(geometry.into_positions())
}

/// Round a polyline given as an array of `{x, y, z}` objects (e.g. three.js `Vector3`).
///
/// Returns a new array of `{x, y, z}` objects.
#[wasm_bindgen(js_name = roundedCornerPoints)]
pub fn rounded_corner_line_points(
    points: JsValue,
    radiuses: &[f64],
    smoothness: Option<f64>,
    closed: Option<bool>,
) -> Result<JsValue, JsValue> {
    // `null` and `undefined` both deserialize to `None`.
    let points: Option<Vec<Point3>> = serde_wasm_bindgen::from_value(points)
        .map_err(|err| JsError::new(&format!("invalid points: {err}")))?;
    let rounded =
        round_point_list(points, radiuses, smoothness, closed).map_err(|err| js_error(&err))?;

    serde_wasm_bindgen::to_value(&rounded).map_err(|err| JsError::new(&err.to_string()).into())
}

/// Rounding behind `roundedCornerPoints`. A missing point list yields an empty list.
fn round_point_list(
    points: Option<Vec<Point3>>,
    radiuses: &[f64],
    smoothness: Option<f64>,
    closed: Option<bool>,
) -> Result<Vec<Point3>, String> {
    let Some(points) = points else {
        return Ok(Vec::new());
    };
    let options = options_from_js(smoothness, closed)?;
    let (rounded, _) = round_corners(&points, radiuses, options, Tolerance::default_geom())
        .map_err(|err| err.to_string())?;
    Ok(rounded)
}

/// Like `roundedCornerLine`, but returns positions together with vertex count,
/// bounding box and diagnostics.
#[wasm_bindgen(js_name = roundedCornerGeometry)]
pub fn rounded_corner_geometry_js(
    points: &[f64],
    radiuses: &[f64],
    smoothness: Option<f64>,
    closed: Option<bool>,
) -> Result<JsValue, JsValue> {
    let points = points_from_flat(points).map_err(|err| js_error(&err))?;
    let options = options_from_js(smoothness, closed).map_err(|err| js_error(&err))?;
    let (geometry, diagnostics) =
        geom::rounded_corner_geometry(&points, radiuses, options, Tolerance::default_geom())
            .map_err(to_js_error)?;

    debug_log!(
        "roundedCornerGeometry: {} points -> {} vertices ({} corners skipped)",
        points.len(),
        geometry.vertex_count(),
        diagnostics.skipped_corner_count
    );

    serde_wasm_bindgen::to_value(&GeometryExport::new(geometry, diagnostics))
        .map_err(|err| JsError::new(&err.to_string()).into())
}

fn points_from_flat(coordinates: &[f64]) -> Result<Vec<Point3>, String> {
    if coordinates.len() % 3 != 0 {
        return Err(format!(
            "coordinate count must be a multiple of 3, got {}",
            coordinates.len()
        ));
    }
    Ok(coordinates
        .chunks_exact(3)
        .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
        .collect())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn options_from_js(
    smoothness: Option<f64>,
    closed: Option<bool>,
) -> Result<RoundedCornerOptions, String> {
    let max = RoundedCornerOptions::MAX_SMOOTHNESS;
    let smoothness = match smoothness {
        None => RoundedCornerOptions::DEFAULT_SMOOTHNESS,
        Some(value) if value.is_finite() && value >= 1.0 && value < (max + 1) as f64 => {
            value.floor() as usize
        }
        Some(value) => {
            return Err(format!(
                "smoothness must be a finite number between 1 and {max}, got {value}"
            ));
        }
    };
    Ok(RoundedCornerOptions::new(smoothness, closed.unwrap_or(false)))
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::warn!("{message}");
        JsValue::NULL
    }
}
