use std::f32::consts::PI;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::config::{VERTEX_MAX, VERTEX_MIN};
use crate::error::{ZoneError, ZoneResult};

pub const RADIUS_INSET: f32 = 5.0;
pub const RADIUS_JITTER_MIN: f32 = 0.6;
pub const RADIUS_JITTER_SPAN: f32 = 0.8;
pub const HUE_RANGE: u32 = 360;

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

/// Deterministic stream over `splitmix32`. The app seeds it once per
/// session; tests seed it with constants.
#[derive(Clone, Debug)]
pub struct ShapeRng {
    state: u32,
}

impl ShapeRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9E37_79B9);
        splitmix32(self.state)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_unit(&mut self) -> f32 {
        let top = self.next_u32() >> 8;
        top as f32 / ((1u32 << 24) as f32)
    }

    /// Uniform integer in `[min, max]`, both inclusive.
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32()) % span) as u32
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    pub vertices: u8,
    pub points: Vec<(f32, f32)>,
    pub size: f32,
    pub hue: u16,
}

impl PolygonShape {
    pub fn random(rng: &mut ShapeRng, size: f32, vertex_min: u8, vertex_max: u8) -> Self {
        let vertices = random_vertex_count(rng, vertex_min, vertex_max);
        let points = generate_polygon_points(vertices, size, rng);
        let hue = rng.range_inclusive(0, HUE_RANGE - 1) as u16;
        Self {
            vertices,
            points,
            size,
            hue,
        }
    }

    pub fn from_parts(vertices: u32, points: Vec<(f32, f32)>, size: f32, hue: u16) -> ZoneResult<Self> {
        let found = vertices as usize;
        if found < VERTEX_MIN as usize || found > VERTEX_MAX as usize {
            return Err(ZoneError::VertexCount {
                min: VERTEX_MIN,
                max: VERTEX_MAX,
                found,
            });
        }
        if points.len() != found {
            return Err(ZoneError::PointCount {
                expected: found,
                found: points.len(),
            });
        }
        if let Some((x, y)) = points.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(ZoneError::MalformedPoint(format!("{x},{y}")));
        }
        let size = if size.is_finite() && size > 0.0 {
            size
        } else {
            crate::config::POLYGON_SIZE_DEFAULT
        };
        Ok(Self {
            vertices: vertices as u8,
            points,
            size,
            hue: hue % HUE_RANGE as u16,
        })
    }

    pub fn points_attr(&self) -> String {
        format_points(&self.points)
    }

    pub fn view_box(&self) -> String {
        view_box(self.size)
    }
}

pub fn random_vertex_count(rng: &mut ShapeRng, min: u8, max: u8) -> u8 {
    let min = min.clamp(VERTEX_MIN, VERTEX_MAX);
    let max = max.clamp(min, VERTEX_MAX);
    rng.range_inclusive(u32::from(min), u32::from(max)) as u8
}

/// Points on a jittered circle centred in a `size x size` box. Vertex `i`
/// sits at angle `i * 2π / n`; its radius is clamped to half the box so the
/// shape never leaves `[0, size]`.
pub fn generate_polygon_points(vertices: u8, size: f32, rng: &mut ShapeRng) -> Vec<(f32, f32)> {
    let count = usize::from(vertices);
    let center = size * 0.5;
    let radius = (center - RADIUS_INSET).max(0.0);
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let angle = (i as f32 * 2.0 * PI) / count as f32;
        let jitter = RADIUS_JITTER_MIN + rng.next_unit() * RADIUS_JITTER_SPAN;
        let current = (radius * jitter).min(center);
        let (sin, cos) = angle.sin_cos();
        let x = (center + current * cos).clamp(0.0, size);
        let y = (center + current * sin).clamp(0.0, size);
        points.push((x, y));
    }
    points
}

pub fn format_points(points: &[(f32, f32)]) -> String {
    let mut out = String::with_capacity(points.len() * 12);
    for (index, (x, y)) in points.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{x},{y}");
    }
    out
}

pub fn parse_points(raw: &str) -> ZoneResult<Vec<(f32, f32)>> {
    raw.split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| ZoneError::MalformedPoint(pair.to_string()))?;
            let x = x
                .trim()
                .parse::<f32>()
                .map_err(|_| ZoneError::MalformedPoint(pair.to_string()))?;
            let y = y
                .trim()
                .parse::<f32>()
                .map_err(|_| ZoneError::MalformedPoint(pair.to_string()))?;
            if !x.is_finite() || !y.is_finite() {
                return Err(ZoneError::MalformedPoint(pair.to_string()));
            }
            Ok((x, y))
        })
        .collect()
}

pub fn view_box(size: f32) -> String {
    format!("0 0 {size} {size}")
}
