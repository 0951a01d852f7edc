use crate::error::ZoneResult;
use crate::ids::{IdAllocator, PolygonId};
use crate::layout::{decode_layout, encode_layout, LayoutStore, PlacedPolygon};

/// Polygons placed in the work zone, in paint order.
#[derive(Clone, Debug, Default)]
pub struct WorkBoard {
    placed: Vec<PlacedPolygon>,
}

impl WorkBoard {
    pub fn new() -> Self {
        Self { placed: Vec::new() }
    }

    pub fn place(&mut self, polygon: PlacedPolygon) {
        self.placed.push(polygon);
    }

    pub fn move_to(&mut self, id: PolygonId, left: f32, top: f32) -> bool {
        let Some(polygon) = self.placed.iter_mut().find(|polygon| polygon.id == id) else {
            return false;
        };
        polygon.left = left;
        polygon.top = top;
        true
    }

    pub fn take(&mut self, id: PolygonId) -> Option<PlacedPolygon> {
        let index = self.placed.iter().position(|polygon| polygon.id == id)?;
        Some(self.placed.remove(index))
    }

    pub fn get(&self, id: PolygonId) -> Option<&PlacedPolygon> {
        self.placed.iter().find(|polygon| polygon.id == id)
    }

    pub fn contains(&self, id: PolygonId) -> bool {
        self.get(id).is_some()
    }

    pub fn clear(&mut self) {
        self.placed.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedPolygon> {
        self.placed.iter()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn save(&self, store: &dyn LayoutStore, scale: f32) -> ZoneResult<usize> {
        let raw = encode_layout(&self.placed, scale)?;
        store.save_raw(&raw)?;
        Ok(self.placed.len())
    }

    /// Replaces the board with the stored layout. A missing value leaves the
    /// board untouched; a value that fails to decode leaves it empty.
    pub fn load(
        &mut self,
        store: &dyn LayoutStore,
        current_scale: f32,
        ids: &mut IdAllocator,
    ) -> ZoneResult<usize> {
        let Some(raw) = store.load_raw()? else {
            return Ok(0);
        };
        self.placed.clear();
        if raw.trim().is_empty() {
            return Ok(0);
        }
        self.placed = decode_layout(&raw, current_scale, ids)?;
        Ok(self.placed.len())
    }

    pub fn reset(&mut self, store: &dyn LayoutStore) -> ZoneResult<()> {
        self.placed.clear();
        store.clear()
    }
}
