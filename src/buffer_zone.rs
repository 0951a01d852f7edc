use std::rc::Rc;

use polyzone_core::{DragOrigin, TrayPolygon, DRAG_MIME, DRAG_MIME_FALLBACK};
use web_sys::DataTransfer;
use yew::prelude::*;

use crate::app_core::{AppCore, AppSnapshot};
use crate::polygon_view::PolygonView;

#[derive(Properties)]
pub(crate) struct BufferZoneProps {
    pub core: Rc<AppCore>,
    pub snapshot: Rc<AppSnapshot>,
}

impl PartialEq for BufferZoneProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
            && (Rc::ptr_eq(&self.snapshot, &other.snapshot)
                || (self.snapshot.tray == other.snapshot.tray
                    && self.snapshot.drag == other.snapshot.drag))
    }
}

/// Reads the drag payload, preferring JSON and falling back to plain text.
pub(crate) fn read_payload(transfer: &DataTransfer) -> String {
    let raw = transfer.get_data(DRAG_MIME).unwrap_or_default();
    if !raw.trim().is_empty() {
        return raw;
    }
    transfer.get_data(DRAG_MIME_FALLBACK).unwrap_or_default()
}

#[function_component(BufferZone)]
pub(crate) fn buffer_zone(props: &BufferZoneProps) -> Html {
    let ondragover = {
        let core = props.core.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            if let Some(transfer) = event.data_transfer() {
                transfer.set_drop_effect(core.tray_drop_effect().as_str());
            }
        })
    };
    let ondrop = {
        let core = props.core.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            let raw = event
                .data_transfer()
                .map(|transfer| read_payload(&transfer))
                .unwrap_or_default();
            core.drop_on_tray(&raw);
        })
    };
    let dragging = props.snapshot.drag;
    let polygons = props.snapshot.tray.iter().map(|TrayPolygon { id, shape }| {
        let is_dragging = dragging.is_some_and(|drag| drag.id == *id);
        html! {
            <PolygonView
                key={id.0}
                core={props.core.clone()}
                id={*id}
                shape={shape.clone()}
                origin={DragOrigin::Tray}
                dragging={is_dragging}
            />
        }
    });
    html! {
        <section class="buffer-zone" {ondragover} {ondrop}>
            { for polygons }
        </section>
    }
}
