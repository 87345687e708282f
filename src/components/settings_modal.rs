use yew::prelude::*;

use crate::settings::Settings;
use crate::win::ScanMode;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_cull_cb = {
        let cb = props.on_change.clone();
        let s = props.settings;
        Callback::from(move |_| {
            cb.emit(Settings {
                cull_win_lines: !s.cull_win_lines,
                ..s
            })
        })
    };
    let toggle_scan_cb = {
        let cb = props.on_change.clone();
        let s = props.settings;
        Callback::from(move |_| {
            let scan_mode = match s.scan_mode {
                ScanMode::Incremental => ScanMode::FullBoard,
                ScanMode::FullBoard => ScanMode::Incremental,
            };
            cb.emit(Settings { scan_mode, ..s })
        })
    };
    let reset_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(Settings::default()))
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.35); z-index:50;">
        <div style="background:#ffffff; color:#24292f; border:1px solid #d0d7de; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.settings.cull_win_lines} onclick={toggle_cull_cb} />
                    <span>{"Skip off-screen win lines"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.settings.scan_mode == ScanMode::FullBoard} onclick={toggle_scan_cb} />
                    <span>{"Rescan the whole board after every move"}</span>
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="flex:1;">{"Restore defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Settings are saved in this browser. The board itself is not saved."}</div>
        </div>
    </div>}
}
