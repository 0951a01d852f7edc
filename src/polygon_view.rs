use std::rc::Rc;

use polyzone_core::{DragOrigin, PolygonId, PolygonShape, DRAG_MIME, DRAG_MIME_FALLBACK};
use yew::prelude::*;

use crate::app_core::AppCore;

#[derive(Properties)]
pub(crate) struct PolygonViewProps {
    pub core: Rc<AppCore>,
    pub id: PolygonId,
    pub shape: PolygonShape,
    pub origin: DragOrigin,
    #[prop_or_default]
    pub dragging: bool,
    #[prop_or_default]
    pub style: Option<AttrValue>,
}

impl PartialEq for PolygonViewProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
            && self.id == other.id
            && self.shape == other.shape
            && self.origin == other.origin
            && self.dragging == other.dragging
            && self.style == other.style
    }
}

fn fill_color(hue: u16) -> String {
    format!("hsl({hue}, 65%, 55%)")
}

#[function_component(PolygonView)]
pub(crate) fn polygon_view(props: &PolygonViewProps) -> Html {
    let ondragstart = {
        let core = props.core.clone();
        let id = props.id;
        let origin = props.origin;
        Callback::from(move |event: DragEvent| {
            let Some(raw) = core.begin_drag(id, origin) else {
                event.prevent_default();
                return;
            };
            let Some(transfer) = event.data_transfer() else {
                return;
            };
            if transfer.set_data(DRAG_MIME, &raw).is_err() {
                gloo::console::warn!("drag: json payload refused");
            }
            if transfer.set_data(DRAG_MIME_FALLBACK, &raw).is_err() {
                gloo::console::warn!("drag: text payload refused");
            }
            transfer.set_effect_allowed("move");
        })
    };
    let ondragend = {
        let core = props.core.clone();
        Callback::from(move |_: DragEvent| core.end_drag())
    };
    let class = classes!(
        "polygon",
        match props.origin {
            DragOrigin::Tray => "polygon--tray",
            DragOrigin::WorkZone => "polygon--placed",
        },
        props.dragging.then_some("polygon--dragging"),
    );
    let size = props.shape.size.to_string();
    html! {
        <div
            {class}
            style={props.style.clone()}
            draggable="true"
            data-polygon-id={props.id.to_string()}
            {ondragstart}
            {ondragend}
        >
            <svg
                width={size.clone()}
                height={size}
                viewBox={props.shape.view_box()}
                xmlns="http://www.w3.org/2000/svg"
            >
                <polygon points={props.shape.points_attr()} fill={fill_color(props.shape.hue)} />
            </svg>
        </div>
    }
}
