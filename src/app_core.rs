use std::cell::RefCell;
use std::rc::Rc;

use polyzone_core::{
    ActiveDrag, Axis, DragOrigin, DropEffect, DropOutcome, Editor, EditorConfig, GridMarker,
    LayoutStore, PlacedPolygon, PolygonId, TrayPolygon, ZoneResult,
};

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

/// Shared page state. Components hold an `Rc<AppCore>`, call its actions and
/// re-render from `snapshot()` whenever a subscriber fires.
pub(crate) struct AppCore {
    editor: RefCell<Editor>,
    store: Box<dyn LayoutStore>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AppSnapshot {
    pub tray: Vec<TrayPolygon>,
    pub placed: Vec<PlacedPolygon>,
    pub scale: f32,
    pub scroll: (f32, f32),
    pub canvas: (f32, f32),
    pub cell_px: f32,
    pub horizontal_markers: Vec<GridMarker>,
    pub vertical_markers: Vec<GridMarker>,
    pub drag: Option<ActiveDrag>,
    pub panning: bool,
}

impl AppCore {
    pub(crate) fn new(config: EditorConfig, seed: u32, store: Box<dyn LayoutStore>) -> Rc<Self> {
        Rc::new(Self {
            editor: RefCell::new(Editor::new(config, seed)),
            store,
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    pub(crate) fn snapshot(&self) -> AppSnapshot {
        let editor = self.editor.borrow();
        let viewport = editor.viewport();
        AppSnapshot {
            tray: editor.tray().iter().cloned().collect(),
            placed: editor.board().iter().cloned().collect(),
            scale: viewport.scale(),
            scroll: viewport.scroll(),
            canvas: viewport.canvas_size(),
            cell_px: viewport.cell_px(),
            horizontal_markers: viewport.markers(Axis::Horizontal),
            vertical_markers: viewport.markers(Axis::Vertical),
            drag: editor.active_drag(),
            panning: viewport.is_panning(),
        }
    }

    pub(crate) fn create_polygons(&self) {
        let count = self.editor.borrow_mut().create_polygons();
        gloo::console::log!("tray: created", count);
        self.notify();
    }

    pub(crate) fn save(&self) {
        let result = self.editor.borrow().save(self.store.as_ref());
        match result {
            Ok(count) => gloo::console::log!("layout: saved", count),
            Err(err) => gloo::console::error!("layout: save failed", err.to_string()),
        }
    }

    pub(crate) fn load(&self) {
        let result = self.editor.borrow_mut().load(self.store.as_ref());
        match result {
            Ok(0) => {}
            Ok(count) => gloo::console::log!("layout: loaded", count),
            Err(err) => gloo::console::error!("layout: load failed", err.to_string()),
        }
        self.notify();
    }

    /// Empties the tray and the board and forgets the stored layout.
    pub(crate) fn reset(&self) {
        let result = {
            let mut editor = self.editor.borrow_mut();
            editor.clear_tray();
            editor.reset(self.store.as_ref())
        };
        match result {
            Ok(()) => gloo::console::log!("layout: reset"),
            Err(err) => gloo::console::error!("layout: reset failed", err.to_string()),
        }
        self.notify();
    }

    /// Returns the encoded drag payload, or `None` if the polygon is gone.
    pub(crate) fn begin_drag(&self, id: PolygonId, origin: DragOrigin) -> Option<String> {
        let payload = self.editor.borrow_mut().begin_drag(id, origin)?;
        let encoded = match payload.encode() {
            Ok(encoded) => encoded,
            Err(err) => {
                gloo::console::error!("drag: encode failed", err.to_string());
                self.editor.borrow_mut().end_drag();
                return None;
            }
        };
        self.notify();
        Some(encoded)
    }

    pub(crate) fn end_drag(&self) {
        if self.editor.borrow_mut().end_drag().is_some() {
            self.notify();
        }
    }

    pub(crate) fn tray_drop_effect(&self) -> DropEffect {
        self.editor.borrow().tray_drop_effect()
    }

    pub(crate) fn drop_on_tray(&self, raw: &str) {
        let result = self.editor.borrow_mut().drop_on_tray(raw);
        self.finish_drop("tray", result);
    }

    pub(crate) fn drop_on_work_zone(&self, raw: &str, client: (f32, f32), rect_origin: (f32, f32)) {
        let result = self
            .editor
            .borrow_mut()
            .drop_on_work_zone(raw, client, rect_origin);
        self.finish_drop("work zone", result);
    }

    fn finish_drop(&self, target: &str, result: ZoneResult<DropOutcome>) {
        match result {
            Ok(DropOutcome::Rejected) => {
                gloo::console::warn!(format!("{target}: drop rejected"));
            }
            Ok(outcome) => {
                gloo::console::log!(format!("{target}: {outcome:?}"));
            }
            Err(err) => {
                gloo::console::error!(format!("{target}: bad drag data"), err.to_string());
            }
        }
        self.notify();
    }

    pub(crate) fn resize(&self, width: f32, height: f32) {
        self.editor.borrow_mut().viewport_mut().resize(width, height);
        self.notify();
    }

    pub(crate) fn sync_scroll(&self, left: f32, top: f32) {
        let changed = {
            let mut editor = self.editor.borrow_mut();
            let before = editor.viewport().scroll();
            editor.viewport_mut().sync_scroll(left, top);
            before != editor.viewport().scroll()
        };
        if changed {
            self.notify();
        }
    }

    pub(crate) fn zoom_at(&self, delta_y: f32, mouse_x: f32, mouse_y: f32) {
        let changed = self
            .editor
            .borrow_mut()
            .viewport_mut()
            .zoom_at(delta_y, mouse_x, mouse_y);
        if changed {
            self.notify();
        }
    }

    pub(crate) fn begin_pan(&self, client_x: f32, client_y: f32) {
        self.editor
            .borrow_mut()
            .viewport_mut()
            .begin_pan(client_x, client_y);
        self.notify();
    }

    pub(crate) fn pan_to(&self, client_x: f32, client_y: f32) {
        let moved = self
            .editor
            .borrow_mut()
            .viewport_mut()
            .pan_to(client_x, client_y);
        if moved {
            self.notify();
        }
    }

    pub(crate) fn end_pan(&self) {
        if self.editor.borrow_mut().viewport_mut().end_pan() {
            self.notify();
        }
    }
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;

    use polyzone_core::MemoryStore;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn core() -> Rc<AppCore> {
        let core = AppCore::new(EditorConfig::default(), 11, Box::new(MemoryStore::new()));
        core.resize(800.0, 600.0);
        core
    }

    #[wasm_bindgen_test]
    fn subscribers_fire_until_dropped() {
        let core = core();
        let hits = Rc::new(Cell::new(0u32));
        let subscription = {
            let hits = Rc::clone(&hits);
            core.subscribe(Rc::new(move || hits.set(hits.get() + 1)))
        };
        core.create_polygons();
        assert_eq!(hits.get(), 1);
        drop(subscription);
        core.create_polygons();
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    fn drag_from_tray_lands_on_board() {
        let core = core();
        core.create_polygons();
        let snapshot = core.snapshot();
        let id = snapshot.tray[0].id;
        let raw = core.begin_drag(id, DragOrigin::Tray).unwrap();
        assert_eq!(core.snapshot().drag.map(|drag| drag.id), Some(id));
        core.drop_on_work_zone(&raw, (120.0, 80.0), (20.0, 30.0));
        let after = core.snapshot();
        assert_eq!(after.tray.len(), snapshot.tray.len() - 1);
        assert_eq!(after.placed.len(), 1);
        assert_eq!((after.placed[0].left, after.placed[0].top), (100.0, 50.0));
        assert!(after.drag.is_none());
    }

    #[wasm_bindgen_test]
    fn save_reset_load_cycle() {
        let core = core();
        core.create_polygons();
        let id = core.snapshot().tray[0].id;
        let raw = core.begin_drag(id, DragOrigin::Tray).unwrap();
        core.drop_on_work_zone(&raw, (10.0, 10.0), (0.0, 0.0));
        core.save();
        core.load();
        assert_eq!(core.snapshot().placed.len(), 1);
        core.reset();
        let snapshot = core.snapshot();
        assert!(snapshot.tray.is_empty());
        assert!(snapshot.placed.is_empty());
        core.load();
        assert!(core.snapshot().placed.is_empty());
    }
}
