use yew::prelude::*;

use crate::game::GameSummary;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusPanelProps {
    pub summary: GameSummary,
}

#[function_component]
pub fn StatusPanel(props: &StatusPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:48px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let s = props.summary;
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(255,255,255,0.92); border:1px solid #d0d7de; border-radius:8px; padding:10px 14px; min-width:180px; display:flex; flex-direction:column; gap:8px; font-size:14px; color:#24292f;">
            <div style={row_style}>
                <span style={label_style}>{"To move"}</span>
                <span style={value_style}>{ s.to_move.symbol() }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Marks"}</span>
                <span style={value_style}>{ s.marks }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#cf222e;", label_style)}>{"Lines"}</span>
                <span style={format!("{} color:#cf222e;", value_style)}>{ s.lines }</span>
            </div>
        </div>
    }
}
