/// Chip bar components rendered inside the injected container

use crate::controller::PageEvent;
use crate::language_pair::LanguagePair;
use yew::prelude::*;

/// Extra inline style when chips borrow the host button classes, which are
/// sized for icon buttons
const BORROWED_CLASS_STYLE: &str = "padding: 5px; height: auto;";

const REMOVE_ICON_STYLE: &str = "margin-left: 10px; height: 14px; width: 14px; cursor: pointer;";

const CLOSE_PATH: &str = "M19 6.41L17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12 19 6.41z";

#[derive(Properties, PartialEq)]
pub struct ChipBarProps {
    pub items: Vec<LanguagePair>,
    /// Class list copied from the host page's reference button
    #[prop_or_default]
    pub button_class: Option<String>,
    pub on_event: Callback<PageEvent>,
}

#[function_component(ChipBar)]
pub fn chip_bar(props: &ChipBarProps) -> Html {
    html! {
        <>
            <SaveButton class={props.button_class.clone()} on_event={props.on_event.clone()} />
            {for props.items.iter().map(|item| html! {
                <Chip
                    item={item.clone()}
                    class={props.button_class.clone()}
                    on_event={props.on_event.clone()}
                />
            })}
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct SaveButtonProps {
    #[prop_or_default]
    pub class: Option<String>,
    pub on_event: Callback<PageEvent>,
}

#[function_component(SaveButton)]
pub fn save_button(props: &SaveButtonProps) -> Html {
    let onclick = props.on_event.reform(|_: MouseEvent| PageEvent::Save);

    html! {
        <button class={classes!("quick-link-save", props.class.clone())} {onclick}>
            {"Save"}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChipProps {
    pub item: LanguagePair,
    #[prop_or_default]
    pub class: Option<String>,
    pub on_event: Callback<PageEvent>,
}

#[function_component(Chip)]
pub fn chip(props: &ChipProps) -> Html {
    let on_select = {
        let item = props.item.clone();
        props.on_event.reform(move |_: MouseEvent| PageEvent::Select(item.clone()))
    };

    let on_remove = {
        let item = props.item.clone();
        let on_event = props.on_event.clone();
        Callback::from(move |e: MouseEvent| {
            // Keep the click from reaching the chip and selecting it
            e.stop_propagation();
            on_event.emit(PageEvent::Remove(item.clone()));
        })
    };

    let style = props.class.is_some().then_some(BORROWED_CLASS_STYLE);

    html! {
        <button class={classes!("quick-link-chip", props.class.clone())} {style} onclick={on_select}>
            {props.item.label()}
            <RemoveIcon onclick={on_remove} />
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct RemoveIconProps {
    pub onclick: Callback<MouseEvent>,
}

#[function_component(RemoveIcon)]
pub fn remove_icon(props: &RemoveIconProps) -> Html {
    html! {
        <div class="remove-icon" style={REMOVE_ICON_STYLE} onclick={props.onclick.clone()}>
            <svg focusable="false" width="14" height="14" viewBox="0 0 24 24">
                <path d={CLOSE_PATH}></path>
            </svg>
        </div>
    }
}
