use yew::prelude::*;

use crate::model::Player;

#[derive(Properties, PartialEq, Clone)]
pub struct WinBannerProps {
    pub winner: Option<Player>,
    pub on_new_game: Callback<()>,
}

/// Non-blocking reminder of the last win; play may continue underneath.
#[function_component]
pub fn WinBanner(props: &WinBannerProps) -> Html {
    let Some(winner) = props.winner else {
        return html! {};
    };
    let new_game = {
        let cb = props.on_new_game.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); background:rgba(255,255,255,0.95); border:2px solid #cf222e; padding:8px 16px; border-radius:12px; display:flex; gap:12px; align-items:center; color:#24292f;">
            <strong style="color:#cf222e;">{ format!("Player {} wins", winner) }</strong>
            <button onclick={new_game}>{"New game"}</button>
        </div>
    }
}
