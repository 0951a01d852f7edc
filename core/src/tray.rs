use crate::config::EditorConfig;
use crate::geometry::{PolygonShape, ShapeRng};
use crate::ids::{IdAllocator, PolygonId};

#[derive(Clone, Debug, PartialEq)]
pub struct TrayPolygon {
    pub id: PolygonId,
    pub shape: PolygonShape,
}

/// The buffer tray: freshly generated polygons waiting to be placed.
#[derive(Clone, Debug, Default)]
pub struct BufferTray {
    polygons: Vec<TrayPolygon>,
}

impl BufferTray {
    pub fn new() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }

    /// Replaces the tray contents with a random batch.
    pub fn fill(&mut self, rng: &mut ShapeRng, ids: &mut IdAllocator, config: &EditorConfig) -> usize {
        self.polygons.clear();
        let count = rng.range_inclusive(config.tray_min, config.tray_max) as usize;
        self.polygons.reserve(count);
        for _ in 0..count {
            let shape = PolygonShape::random(
                rng,
                config.polygon_size,
                config.vertex_min,
                config.vertex_max,
            );
            self.polygons.push(TrayPolygon {
                id: ids.next_id(),
                shape,
            });
        }
        count
    }

    pub fn clear(&mut self) {
        self.polygons.clear();
    }

    pub fn push(&mut self, polygon: TrayPolygon) {
        self.polygons.push(polygon);
    }

    pub fn take(&mut self, id: PolygonId) -> Option<TrayPolygon> {
        let index = self.polygons.iter().position(|polygon| polygon.id == id)?;
        Some(self.polygons.remove(index))
    }

    pub fn contains(&self, id: PolygonId) -> bool {
        self.polygons.iter().any(|polygon| polygon.id == id)
    }

    pub fn get(&self, id: PolygonId) -> Option<&TrayPolygon> {
        self.polygons.iter().find(|polygon| polygon.id == id)
    }

    pub fn move_to_end(&mut self, id: PolygonId) -> bool {
        match self.take(id) {
            Some(polygon) => {
                self.polygons.push(polygon);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrayPolygon> {
        self.polygons.iter()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
