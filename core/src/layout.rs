use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{ZoneError, ZoneResult};
use crate::geometry::{format_points, parse_points, PolygonShape};
use crate::ids::{IdAllocator, PolygonId};

const SCALE_MATCH_EPSILON: f32 = 1.0e-4;

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPolygon {
    pub id: PolygonId,
    pub shape: PolygonShape,
    pub left: f32,
    pub top: f32,
    pub transform_scale: f32,
}

impl PlacedPolygon {
    pub fn transform_css(&self) -> String {
        format_scale(self.transform_scale)
    }

    /// Inline style for the placed element. The correction scale applied
    /// after a reload at another zoom grows the polygon around its centre.
    pub fn style_css(&self) -> String {
        format!(
            "left: {}; top: {}; transform: {}; transform-origin: center center;",
            format_css_px(self.left),
            format_css_px(self.top),
            self.transform_css()
        )
    }
}

/// Storage backend for the serialized layout.
pub trait LayoutStore {
    fn load_raw(&self) -> ZoneResult<Option<String>>;
    fn save_raw(&self, raw: &str) -> ZoneResult<()>;
    fn clear(&self) -> ZoneResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: &str) -> Self {
        Self {
            slot: RefCell::new(Some(raw.to_string())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl LayoutStore for MemoryStore {
    fn load_raw(&self) -> ZoneResult<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn save_raw(&self, raw: &str) -> ZoneResult<()> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> ZoneResult<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordPosition {
    pub left: String,
    pub top: String,
}

/// One entry of the persisted array. Field shapes follow what earlier
/// builds of the page wrote, so `vertices` and `size` may arrive as strings
/// or be missing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    pub vertices: NumberOrText,
    pub points: String,
    #[serde(default)]
    pub size: Option<NumberOrText>,
    pub position: RecordPosition,
    #[serde(default)]
    pub transform: Option<String>,
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(value) => Some(*value),
            NumberOrText::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

impl PolygonRecord {
    pub fn from_placed(polygon: &PlacedPolygon, scale: f32) -> Self {
        Self {
            vertices: NumberOrText::Number(f64::from(polygon.shape.vertices)),
            points: format_points(&polygon.shape.points),
            size: Some(NumberOrText::Number(f64::from(polygon.shape.size))),
            position: RecordPosition {
                left: format_css_px(polygon.left),
                top: format_css_px(polygon.top),
            },
            transform: Some(polygon.transform_css()),
            scale: Some(scale),
            hue: Some(polygon.shape.hue),
        }
    }

    /// Rebuilds the polygon for a viewport currently at `current_scale`.
    /// A record saved at a different scale gets `current / saved` as its
    /// transform scale; otherwise the stored transform is kept.
    pub fn into_placed(self, id: PolygonId, current_scale: f32) -> ZoneResult<PlacedPolygon> {
        let points = parse_points(&self.points)?;
        let vertices = self
            .vertices
            .as_f64()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(|value| value as u32)
            .unwrap_or(points.len() as u32);
        let size = self
            .size
            .as_ref()
            .and_then(NumberOrText::as_f64)
            .map(|value| value as f32)
            .unwrap_or(crate::config::POLYGON_SIZE_DEFAULT);
        let shape = PolygonShape::from_parts(vertices, points, size, self.hue.unwrap_or(0))?;
        let left = parse_css_px(&self.position.left)?;
        let top = parse_css_px(&self.position.top)?;
        let transform_scale = match self.scale {
            Some(saved) if saved > 0.0 && (current_scale - saved).abs() > SCALE_MATCH_EPSILON => {
                current_scale / saved
            }
            _ => self
                .transform
                .as_deref()
                .and_then(parse_scale)
                .unwrap_or(1.0),
        };
        Ok(PlacedPolygon {
            id,
            shape,
            left,
            top,
            transform_scale,
        })
    }
}

pub fn encode_layout<'a, I>(polygons: I, scale: f32) -> ZoneResult<String>
where
    I: IntoIterator<Item = &'a PlacedPolygon>,
{
    let records: Vec<PolygonRecord> = polygons
        .into_iter()
        .map(|polygon| PolygonRecord::from_placed(polygon, scale))
        .collect();
    codec::encode(&records)
}

pub fn decode_layout(
    raw: &str,
    current_scale: f32,
    ids: &mut IdAllocator,
) -> ZoneResult<Vec<PlacedPolygon>> {
    let records: Vec<PolygonRecord> = codec::decode(raw)?;
    records
        .into_iter()
        .map(|record| record.into_placed(ids.next_id(), current_scale))
        .collect()
}

pub fn format_css_px(value: f32) -> String {
    format!("{value}px")
}

pub fn parse_css_px(raw: &str) -> ZoneResult<f32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    match number.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ZoneError::MalformedLength(raw.to_string())),
    }
}

pub fn format_scale(value: f32) -> String {
    format!("scale({value})")
}

pub fn parse_scale(raw: &str) -> Option<f32> {
    let inner = raw.trim().strip_prefix("scale(")?.strip_suffix(')')?;
    let value = inner.trim().parse::<f32>().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_px_accepts_bare_numbers() {
        assert_eq!(parse_css_px("12.5px").unwrap(), 12.5);
        assert_eq!(parse_css_px(" 7 ").unwrap(), 7.0);
        assert_eq!(parse_css_px("").unwrap(), 0.0);
        assert!(parse_css_px("12em").is_err());
    }

    #[test]
    fn scale_parses_only_scale_functions() {
        assert_eq!(parse_scale("scale(0.5)"), Some(0.5));
        assert_eq!(parse_scale("rotate(3deg)"), None);
        assert_eq!(parse_scale("scale(-1)"), None);
    }

    #[test]
    fn placed_style_scales_around_centre() {
        let raw = r#"[{"vertices":3,"points":"20,5 35,30 5,30","size":40,
            "position":{"left":"12.5px","top":"40px"},"transform":"scale(1)","scale":2}]"#;
        let mut ids = IdAllocator::new();
        let placed = decode_layout(raw, 1.0, &mut ids).unwrap();
        assert_eq!(
            placed[0].style_css(),
            "left: 12.5px; top: 40px; transform: scale(0.5); transform-origin: center center;"
        );
    }

    #[test]
    fn record_from_earlier_build_loads() {
        let raw = r#"[{"vertices":"3","points":"20,5 35,30 5,30","size":null,
            "position":{"left":"100px","top":"50px"},"transform":"","scale":1}]"#;
        let mut ids = IdAllocator::new();
        let placed = decode_layout(raw, 1.0, &mut ids).unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].shape.vertices, 3);
        assert_eq!(placed[0].shape.size, crate::config::POLYGON_SIZE_DEFAULT);
        assert_eq!((placed[0].left, placed[0].top), (100.0, 50.0));
        assert_eq!(placed[0].transform_scale, 1.0);
    }
}
