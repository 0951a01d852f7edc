pub mod board;
pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod layout;
pub mod transfer;
pub mod tray;
pub mod viewport;

pub use board::WorkBoard;
pub use codec::{decode, encode};
pub use config::{EditorConfig, OVERRIDE_KEYS, STORAGE_KEY};
pub use editor::{ActiveDrag, DropOutcome, Editor};
pub use error::{ZoneError, ZoneResult};
pub use geometry::{
    format_points, generate_polygon_points, parse_points, view_box, PolygonShape, ShapeRng,
};
pub use ids::{IdAllocator, PolygonId};
pub use layout::{LayoutStore, MemoryStore, PlacedPolygon, PolygonRecord};
pub use transfer::{DragOrigin, DragPayload, DropEffect, DRAG_MIME, DRAG_MIME_FALLBACK};
pub use tray::{BufferTray, TrayPolygon};
pub use viewport::{Axis, CellPos, GridMarker, Viewport};
