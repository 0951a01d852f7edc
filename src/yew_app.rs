use std::rc::Rc;

use yew::prelude::*;

use crate::app_core::AppCore;
use crate::buffer_zone::BufferZone;
use crate::button::Button;
use crate::init_config::editor_config_from_location;
use crate::local_store::LocalStorageStore;
use crate::work_zone::WorkZone;

#[derive(Properties)]
pub(crate) struct AppProps {
    pub core: Rc<AppCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

fn random_seed() -> u32 {
    let noise = js_sys::Math::random() * f64::from(u32::MAX);
    (noise as u32) ^ (js_sys::Date::now() as u64 as u32)
}

/// Builds the page state from the address bar settings and local storage.
pub(crate) fn build_app_core() -> Rc<AppCore> {
    let config = editor_config_from_location();
    let store = LocalStorageStore::new(config.storage_key.clone());
    AppCore::new(config, random_seed(), Box::new(store))
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let app_core = props.core.clone();
    let app_snapshot = use_state(|| Rc::new(app_core.snapshot()));
    {
        let app_core = app_core.clone();
        let app_snapshot = app_snapshot.clone();
        use_effect_with((), move |_| {
            let app_core_for_cb = app_core.clone();
            let subscription = app_core.subscribe(Rc::new(move || {
                app_snapshot.set(Rc::new(app_core_for_cb.snapshot()));
            }));
            app_core.load();
            move || drop(subscription)
        });
    }

    let on_create = {
        let app_core = app_core.clone();
        Callback::from(move |()| app_core.create_polygons())
    };
    let on_save = {
        let app_core = app_core.clone();
        Callback::from(move |()| app_core.save())
    };
    let on_reset = {
        let app_core = app_core.clone();
        Callback::from(move |()| app_core.reset())
    };
    let snapshot = (*app_snapshot).clone();

    html! {
        <main class="app">
            <header class="toolbar">
                <Button label="Create" title={AttrValue::from("Fill the tray with random polygons")} onclick={on_create} />
                <Button label="Save" title={AttrValue::from("Store the work zone layout")} onclick={on_save} />
                <Button label="Reset" title={AttrValue::from("Clear the tray, the work zone and the stored layout")} onclick={on_reset} />
            </header>
            <BufferZone core={app_core.clone()} snapshot={snapshot.clone()} />
            <WorkZone core={app_core} {snapshot} />
        </main>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use polyzone_core::{
        DragOrigin, DragPayload, EditorConfig, MemoryStore, DRAG_MIME, DRAG_MIME_FALLBACK,
    };
    use wasm_bindgen_test::*;
    use web_sys::{DataTransfer, DragEvent, DragEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_root(id: &str) -> web_sys::Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        root.set_id(id);
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        root
    }

    #[wasm_bindgen_test(async)]
    async fn renders_toolbar_and_zones() {
        set_panic_hook();
        let root = mount_root("wasm-test-root");
        let core = AppCore::new(EditorConfig::default(), 3, Box::new(MemoryStore::new()));
        let _handle = yew::Renderer::<App>::with_root_and_props(
            root.clone(),
            AppProps { core: core.clone() },
        )
        .render();
        TimeoutFuture::new(10).await;

        assert_eq!(root.query_selector_all(".zone-button").unwrap().length(), 3);
        assert!(root.query_selector(".buffer-zone").unwrap().is_some());
        assert!(root.query_selector(".grid-container").unwrap().is_some());
        assert_eq!(
            root.query_selector(".ruler-corner")
                .unwrap()
                .and_then(|corner| corner.text_content())
                .as_deref(),
            Some("0")
        );

        core.create_polygons();
        TimeoutFuture::new(10).await;
        let rendered = root.query_selector_all(".polygon--tray").unwrap().length() as usize;
        assert_eq!(rendered, core.snapshot().tray.len());
    }

    fn drag_event(kind: &str, transfer: &DataTransfer, client: (i32, i32)) -> DragEvent {
        let init = DragEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_client_x(client.0);
        init.set_client_y(client.1);
        init.set_data_transfer(Some(transfer));
        DragEvent::new_with_event_init_dict(kind, &init).expect("drag event")
    }

    async fn render_app(root_id: &str, seed: u32) -> (web_sys::Element, Rc<AppCore>, yew::AppHandle<App>) {
        let root = mount_root(root_id);
        let core = AppCore::new(EditorConfig::default(), seed, Box::new(MemoryStore::new()));
        let handle = yew::Renderer::<App>::with_root_and_props(
            root.clone(),
            AppProps { core: core.clone() },
        )
        .render();
        core.create_polygons();
        TimeoutFuture::new(10).await;
        (root, core, handle)
    }

    #[wasm_bindgen_test(async)]
    async fn dragstart_writes_both_payload_types() {
        set_panic_hook();
        let (root, core, _handle) = render_app("wasm-dragstart-root", 5).await;
        let id = core.snapshot().tray[0].id;
        let polygon = root
            .query_selector(".polygon--tray")
            .unwrap()
            .expect("tray polygon rendered");
        assert_eq!(polygon.get_attribute("data-polygon-id"), Some(id.to_string()));

        let transfer = DataTransfer::new().expect("data transfer");
        polygon
            .dispatch_event(&drag_event("dragstart", &transfer, (0, 0)))
            .unwrap();

        let json = transfer.get_data(DRAG_MIME).unwrap();
        assert_eq!(transfer.get_data(DRAG_MIME_FALLBACK).unwrap(), json);
        assert_eq!(transfer.effect_allowed(), "move");
        let payload = DragPayload::decode(&json).unwrap();
        assert_eq!(payload.polygon_id, Some(id));
        assert!(!payload.from_work_zone);
        assert_eq!(core.snapshot().drag.map(|drag| drag.id), Some(id));
    }

    #[wasm_bindgen_test(async)]
    async fn drop_on_grid_places_polygon_under_pointer() {
        set_panic_hook();
        let (root, core, _handle) = render_app("wasm-drop-root", 9).await;
        let before = core.snapshot();
        let id = before.tray[0].id;
        let raw = core.begin_drag(id, DragOrigin::Tray).expect("tray polygon");

        let grid = root
            .query_selector(".grid-container")
            .unwrap()
            .expect("grid container rendered");
        let rect = grid.get_bounding_client_rect();
        let client = (rect.left() as i32 + 120, rect.top() as i32 + 80);
        let transfer = DataTransfer::new().expect("data transfer");
        transfer.set_data(DRAG_MIME, &raw).unwrap();
        grid.dispatch_event(&drag_event("drop", &transfer, client))
            .unwrap();
        TimeoutFuture::new(10).await;

        let after = core.snapshot();
        assert_eq!(after.tray.len(), before.tray.len() - 1);
        assert_eq!(after.placed.len(), 1);
        assert!(after.drag.is_none());
        let placed = &after.placed[0];
        assert_eq!(placed.id, id);
        let expected_left = client.0 as f32 - rect.left() as f32;
        let expected_top = client.1 as f32 - rect.top() as f32;
        assert!((placed.left - expected_left).abs() < 1e-3);
        assert!((placed.top - expected_top).abs() < 1e-3);

        let rendered = root
            .query_selector(".polygon--placed")
            .unwrap()
            .expect("placed polygon rendered");
        let style = rendered.get_attribute("style").unwrap_or_default();
        assert!(style.contains(&format!("left: {}px", placed.left)), "{style}");
        assert!(style.contains("transform-origin: center center"), "{style}");
    }
}
