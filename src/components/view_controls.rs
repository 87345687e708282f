use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewControlsProps {
    pub on_reset_view: Callback<()>,
    pub on_new_game: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component(ViewControls)]
pub fn view_controls(props: &ViewControlsProps) -> Html {
    let reset = {
        let cb = props.on_reset_view.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let new_game = {
        let cb = props.on_new_game.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Clear the board and start a new game?").ok())
                .unwrap_or(true);
            if confirmed {
                cb.emit(());
            }
        })
    };
    let settings = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; left:12px; bottom:12px; background:rgba(255,255,255,0.92); border:1px solid #d0d7de; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
        <button onclick={reset}>{"Reset view"}</button>
        <span style="width:8px;"></span>
        <button onclick={new_game}>{"New game"}</button>
        <button onclick={settings}>{"Settings"}</button>
    </div>}
}
