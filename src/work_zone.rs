use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use polyzone_core::{DragOrigin, GridMarker};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, WheelEvent};
use yew::prelude::*;

use crate::app_core::{AppCore, AppSnapshot};
use crate::buffer_zone::read_payload;
use crate::polygon_view::PolygonView;

// Scroll positions the DOM reports are whole pixels.
const SCROLL_SYNC_TOLERANCE: f32 = 0.5;

#[derive(Properties)]
pub(crate) struct WorkZoneProps {
    pub core: Rc<AppCore>,
    pub snapshot: Rc<AppSnapshot>,
}

impl PartialEq for WorkZoneProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core) && Rc::ptr_eq(&self.snapshot, &other.snapshot)
    }
}

fn measure(core: &AppCore, element: &Element) {
    core.resize(element.client_width() as f32, element.client_height() as f32);
}

fn render_markers(markers: &[GridMarker], vertical: bool) -> Html {
    markers
        .iter()
        .map(|marker| {
            let style = if vertical {
                format!("top: {:.3}%;", marker.percent)
            } else {
                format!("left: {:.3}%;", marker.percent)
            };
            html! {
                <span class="ruler__marker" key={marker.value} {style}>{ marker.value.to_string() }</span>
            }
        })
        .collect()
}

/// Starts a pan only when the press lands on the grid itself, not on a
/// polygon.
fn pressed_background(event: &MouseEvent) -> bool {
    if event.button() != 0 {
        return false;
    }
    let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) else {
        return false;
    };
    !matches!(target.closest(".polygon"), Ok(Some(_)))
}

#[function_component(WorkZone)]
pub(crate) fn work_zone(props: &WorkZoneProps) -> Html {
    let container = use_node_ref();
    let snapshot = props.snapshot.clone();

    {
        let core = props.core.clone();
        let container = container.clone();
        use_effect_with((), move |_| {
            let mut listeners = Vec::new();
            if let Some(element) = container.cast::<Element>() {
                measure(&core, &element);
                let wheel_core = core.clone();
                let wheel_target = element.clone();
                listeners.push(EventListener::new_with_options(
                    &element,
                    "wheel",
                    EventListenerOptions::enable_prevent_default(),
                    move |event: &Event| {
                        let Some(event) = event.dyn_ref::<WheelEvent>() else {
                            return;
                        };
                        event.prevent_default();
                        let rect = wheel_target.get_bounding_client_rect();
                        let mouse_x = event.client_x() as f32 - rect.left() as f32;
                        let mouse_y = event.client_y() as f32 - rect.top() as f32;
                        wheel_core.zoom_at(event.delta_y() as f32, mouse_x, mouse_y);
                    },
                ));
                if let Some(window) = web_sys::window() {
                    let resize_core = core.clone();
                    let resize_target = element.clone();
                    listeners.push(EventListener::new(&window, "resize", move |_| {
                        measure(&resize_core, &resize_target);
                    }));
                }
            } else {
                gloo::console::warn!("work zone: container not mounted");
            }
            move || drop(listeners)
        });
    }

    {
        let container = container.clone();
        use_effect_with(snapshot.scroll, move |&(left, top)| {
            if let Some(element) = container.cast::<Element>() {
                if (element.scroll_left() as f32 - left).abs() > SCROLL_SYNC_TOLERANCE {
                    element.set_scroll_left(left.round() as i32);
                }
                if (element.scroll_top() as f32 - top).abs() > SCROLL_SYNC_TOLERANCE {
                    element.set_scroll_top(top.round() as i32);
                }
            }
            || ()
        });
    }

    let onscroll = {
        let core = props.core.clone();
        let container = container.clone();
        Callback::from(move |_: Event| {
            if let Some(element) = container.cast::<Element>() {
                core.sync_scroll(element.scroll_left() as f32, element.scroll_top() as f32);
            }
        })
    };
    let onmousedown = {
        let core = props.core.clone();
        Callback::from(move |event: MouseEvent| {
            if !pressed_background(&event) {
                return;
            }
            event.prevent_default();
            core.begin_pan(event.client_x() as f32, event.client_y() as f32);
        })
    };
    let onmousemove = {
        let core = props.core.clone();
        let panning = snapshot.panning;
        Callback::from(move |event: MouseEvent| {
            if panning {
                core.pan_to(event.client_x() as f32, event.client_y() as f32);
            }
        })
    };
    let onmouseup = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| core.end_pan())
    };
    let onmouseleave = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| core.end_pan())
    };
    let ondragover = Callback::from(|event: DragEvent| {
        event.prevent_default();
        if let Some(transfer) = event.data_transfer() {
            transfer.set_drop_effect("move");
        }
    });
    let ondrop = {
        let core = props.core.clone();
        let container = container.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            let Some(element) = container.cast::<Element>() else {
                return;
            };
            let raw = event
                .data_transfer()
                .map(|transfer| read_payload(&transfer))
                .unwrap_or_default();
            let rect = element.get_bounding_client_rect();
            core.drop_on_work_zone(
                &raw,
                (event.client_x() as f32, event.client_y() as f32),
                (rect.left() as f32, rect.top() as f32),
            );
        })
    };

    let (canvas_width, canvas_height) = snapshot.canvas;
    let canvas_style = format!("width: {canvas_width}px; height: {canvas_height}px;");
    let cell = snapshot.cell_px;
    let grid_style = format!("background-size: {cell}px {cell}px;");
    let layer_style = format!("transform: scale({});", snapshot.scale);
    let placed = snapshot.placed.iter().map(|polygon| {
        let style = polygon.style_css();
        let dragging = snapshot.drag.is_some_and(|drag| drag.id == polygon.id);
        html! {
            <PolygonView
                key={polygon.id.0}
                core={props.core.clone()}
                id={polygon.id}
                shape={polygon.shape.clone()}
                origin={DragOrigin::WorkZone}
                {dragging}
                style={AttrValue::from(style)}
            />
        }
    });
    let container_class = classes!(
        "grid-container",
        snapshot.panning.then_some("grid-container--panning"),
    );

    html! {
        <section class="work-zone">
            <div class="ruler-corner">{ "0" }</div>
            <div class="ruler ruler--horizontal">
                { render_markers(&snapshot.horizontal_markers, false) }
            </div>
            <div class="ruler ruler--vertical">
                { render_markers(&snapshot.vertical_markers, true) }
            </div>
            <div
                ref={container}
                class={container_class}
                {onscroll}
                {onmousedown}
                {onmousemove}
                {onmouseup}
                {onmouseleave}
                {ondragover}
                {ondrop}
            >
                <div class="grid-canvas" style={canvas_style}>
                    <div class="grid-layer" style={grid_style} />
                    <div class="polygons-layer" style={layer_style}>
                        { for placed }
                    </div>
                </div>
            </div>
        </section>
    }
}
