use crate::board::WorkBoard;
use crate::config::EditorConfig;
use crate::error::ZoneResult;
use crate::geometry::ShapeRng;
use crate::ids::{IdAllocator, PolygonId};
use crate::layout::{LayoutStore, PlacedPolygon};
use crate::transfer::{tray_drop_effect, DragOrigin, DragPayload, DropEffect};
use crate::tray::{BufferTray, TrayPolygon};
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveDrag {
    pub id: PolygonId,
    pub origin: DragOrigin,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// A new polygon landed on the board.
    Placed { id: PolygonId, left: f32, top: f32 },
    /// A board polygon changed position.
    Moved { id: PolygonId, left: f32, top: f32 },
    /// A tray polygon was dropped back onto the tray and moved to its end.
    Returned { id: PolygonId },
    /// A payload from outside the page was added to the tray.
    Added { id: PolygonId },
    Rejected,
}

/// Everything the page shows: tray, board, viewport and the drag in flight.
#[derive(Clone, Debug)]
pub struct Editor {
    config: EditorConfig,
    rng: ShapeRng,
    ids: IdAllocator,
    tray: BufferTray,
    board: WorkBoard,
    viewport: Viewport,
    drag: Option<ActiveDrag>,
}

impl Editor {
    pub fn new(config: EditorConfig, seed: u32) -> Self {
        let mut config = config;
        config.validate();
        let viewport = Viewport::new(&config);
        Self {
            config,
            rng: ShapeRng::new(seed),
            ids: IdAllocator::new(),
            tray: BufferTray::new(),
            board: WorkBoard::new(),
            viewport,
            drag: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tray(&self) -> &BufferTray {
        &self.tray
    }

    pub fn board(&self) -> &WorkBoard {
        &self.board
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn active_drag(&self) -> Option<ActiveDrag> {
        self.drag
    }

    pub fn create_polygons(&mut self) -> usize {
        self.drag = None;
        self.tray.fill(&mut self.rng, &mut self.ids, &self.config)
    }

    pub fn clear_tray(&mut self) {
        if matches!(self.drag, Some(ActiveDrag { origin: DragOrigin::Tray, .. })) {
            self.drag = None;
        }
        self.tray.clear();
    }

    /// Starts a drag of a polygon that lives in `origin` and returns the
    /// payload to put into `DataTransfer`.
    pub fn begin_drag(&mut self, id: PolygonId, origin: DragOrigin) -> Option<DragPayload> {
        let shape = match origin {
            DragOrigin::Tray => &self.tray.get(id)?.shape,
            DragOrigin::WorkZone => &self.board.get(id)?.shape,
        };
        let payload = DragPayload::from_shape(id, shape, origin);
        self.drag = Some(ActiveDrag { id, origin });
        Some(payload)
    }

    pub fn end_drag(&mut self) -> Option<ActiveDrag> {
        self.drag.take()
    }

    pub fn tray_drop_effect(&self) -> DropEffect {
        tray_drop_effect(self.drag.map(|drag| drag.origin))
    }

    /// Handles a drop at `client` on the grid container whose bounding rect
    /// starts at `rect_origin`.
    pub fn drop_on_work_zone(
        &mut self,
        raw_payload: &str,
        client: (f32, f32),
        rect_origin: (f32, f32),
    ) -> ZoneResult<DropOutcome> {
        let (left, top) = self
            .viewport
            .client_to_workspace(client.0, client.1, rect_origin.0, rect_origin.1);
        let drag = self.drag.take();
        if let Some(ActiveDrag {
            id,
            origin: DragOrigin::WorkZone,
        }) = drag
        {
            if self.board.move_to(id, left, top) {
                return Ok(DropOutcome::Moved { id, left, top });
            }
        }

        let payload = DragPayload::decode(raw_payload)?;
        let shape = payload.to_shape()?;
        // Payload ids are only unique within one page, so the tray gives up
        // a polygon only for a drag this editor started.
        let tray_id = match drag {
            Some(ActiveDrag {
                id,
                origin: DragOrigin::Tray,
            }) => Some(id),
            _ => None,
        };
        let id = match tray_id.and_then(|id| self.tray.take(id)) {
            Some(source) => source.id,
            None => self.ids.next_id(),
        };
        self.board.place(PlacedPolygon {
            id,
            shape,
            left,
            top,
            transform_scale: 1.0,
        });
        Ok(DropOutcome::Placed { id, left, top })
    }

    pub fn drop_on_tray(&mut self, raw_payload: &str) -> ZoneResult<DropOutcome> {
        match self.drag.take() {
            Some(ActiveDrag {
                origin: DragOrigin::WorkZone,
                ..
            }) => return Ok(DropOutcome::Rejected),
            Some(ActiveDrag {
                id,
                origin: DragOrigin::Tray,
            }) => {
                if self.tray.move_to_end(id) {
                    return Ok(DropOutcome::Returned { id });
                }
            }
            None => {}
        }
        let payload = DragPayload::decode(raw_payload)?;
        if payload.origin() == DragOrigin::WorkZone {
            return Ok(DropOutcome::Rejected);
        }
        let shape = payload.to_shape()?;
        let id = self.ids.next_id();
        self.tray.push(TrayPolygon { id, shape });
        Ok(DropOutcome::Added { id })
    }

    pub fn save(&self, store: &dyn LayoutStore) -> ZoneResult<usize> {
        self.board.save(store, self.viewport.scale())
    }

    pub fn load(&mut self, store: &dyn LayoutStore) -> ZoneResult<usize> {
        let scale = self.viewport.scale();
        self.board.load(store, scale, &mut self.ids)
    }

    /// Clears the board and the stored layout.
    pub fn reset(&mut self, store: &dyn LayoutStore) -> ZoneResult<()> {
        if matches!(self.drag, Some(ActiveDrag { origin: DragOrigin::WorkZone, .. })) {
            self.drag = None;
        }
        self.board.reset(store)
    }
}
