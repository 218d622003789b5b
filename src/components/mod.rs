use yew::prelude::*;

/// The pay button. Marks itself busy while a request is outstanding.
#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    /// Button label text
    pub label: AttrValue,
    /// Click handler
    pub onclick: Callback<MouseEvent>,
    /// Disable state
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    html! {
        <button
            type="button"
            onclick={props.onclick.clone()}
            disabled={props.disabled}
            aria-busy={if props.busy { "true" } else { "false" }}
            class="ypk-button"
        >
            { props.label.clone() }
        </button>
    }
}
