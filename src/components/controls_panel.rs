use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::model::Mode;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub active: bool,
    pub mode: Mode,
    pub sound_enabled: bool,
    pub on_start: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_select_mode: Callback<Mode>,
    pub on_toggle_sound: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let sound_cb = {
        let cb = props.on_toggle_sound.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let mode_cb = {
        let cb = props.on_select_mode.clone();
        Callback::from(move |e: Event| {
            let sel: HtmlSelectElement = e.target_unchecked_into();
            match sel.value().parse::<Mode>() {
                Ok(mode) => cb.emit(mode),
                Err(err) => log::warn!("ignoring mode change: {}", err),
            }
        })
    };
    html! {<div style="display:flex; align-items:center; gap:10px; flex-wrap:wrap;">
        // Start while idle, Reset while a round runs
        if props.active {
            <button id="reset-btn" onclick={reset_cb}>{"Reset"}</button>
        } else {
            <button id="start-btn" onclick={start_cb}>{"Start"}</button>
        }
        <label style="display:flex; align-items:center; gap:6px;">
            <span>{"Mode"}</span>
            <select id="mode" onchange={mode_cb}>
                { for Mode::ALL.iter().map(|m| html! {
                    <option value={m.as_str()} selected={*m == props.mode}>{ m.label() }</option>
                }) }
            </select>
        </label>
        <label style="display:flex; align-items:center; gap:6px; cursor:pointer;">
            <input type="checkbox" checked={props.sound_enabled} onclick={sound_cb} />
            <span>{"Sound"}</span>
        </label>
        if props.active {
            <span style="font-size:11px; opacity:0.7;">{"Mode changes apply next round"}</span>
        }
    </div>}
}
