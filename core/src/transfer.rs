use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{ZoneError, ZoneResult};
use crate::geometry::{format_points, parse_points, view_box, PolygonShape};
use crate::ids::PolygonId;

pub const DRAG_MIME: &str = "application/json";
pub const DRAG_MIME_FALLBACK: &str = "text/plain";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOrigin {
    Tray,
    WorkZone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropEffect {
    Move,
    None,
}

impl DropEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            DropEffect::Move => "move",
            DropEffect::None => "none",
        }
    }
}

/// What a dragged polygon carries through `DataTransfer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub vertices: u32,
    pub points: String,
    pub size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_box: Option<String>,
    #[serde(default)]
    pub hue: u16,
    #[serde(default)]
    pub from_work_zone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon_id: Option<PolygonId>,
}

impl DragPayload {
    pub fn from_shape(id: PolygonId, shape: &PolygonShape, origin: DragOrigin) -> Self {
        Self {
            vertices: u32::from(shape.vertices),
            points: format_points(&shape.points),
            size: shape.size,
            view_box: Some(view_box(shape.size)),
            hue: shape.hue,
            from_work_zone: origin == DragOrigin::WorkZone,
            polygon_id: Some(id),
        }
    }

    pub fn origin(&self) -> DragOrigin {
        if self.from_work_zone {
            DragOrigin::WorkZone
        } else {
            DragOrigin::Tray
        }
    }

    pub fn encode(&self) -> ZoneResult<String> {
        codec::encode(self)
    }

    pub fn decode(raw: &str) -> ZoneResult<Self> {
        if raw.trim().is_empty() {
            return Err(ZoneError::EmptyPayload);
        }
        codec::decode(raw)
    }

    pub fn to_shape(&self) -> ZoneResult<PolygonShape> {
        let points = parse_points(&self.points)?;
        PolygonShape::from_parts(self.vertices, points, self.size, self.hue)
    }
}

/// Drop effect the buffer tray advertises while something hovers it.
/// `DataTransfer` contents are unreadable during `dragover`, so callers pass
/// the origin of the drag they started; `None` (a foreign drag) is accepted.
pub fn tray_drop_effect(origin: Option<DragOrigin>) -> DropEffect {
    match origin {
        Some(DragOrigin::WorkZone) => DropEffect::None,
        _ => DropEffect::Move,
    }
}
