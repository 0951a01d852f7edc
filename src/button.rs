use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ButtonProps {
    pub label: AttrValue,
    pub onclick: Callback<()>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

#[function_component(Button)]
pub(crate) fn button(props: &ButtonProps) -> Html {
    let onclick = {
        let callback = props.onclick.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };
    html! {
        <button class="zone-button" type="button" title={props.title.clone()} {onclick}>
            { props.label.clone() }
        </button>
    }
}
