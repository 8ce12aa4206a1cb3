use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub score: i32,
    pub time_left: u32,
    pub win_score: i32,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:48px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let time_color = if props.time_left <= 5 { "#F5402C" } else { "#2E9DF7" };
    html! {
        <div style="background:#ffffff; border:1px solid #d0d7de; border-radius:8px; padding:10px 14px; min-width:200px; display:flex; flex-direction:column; gap:8px; font-size:15px;">
            <div style={row_style}>
                <span style={format!("{} color:#159A48;", icon_style)}>{"💧"}</span>
                <span style={format!("{} color:#159A48;", label_style)}>{"Score"}</span>
                <span id="score" style={format!("{} color:#159A48;", value_style)}>{ props.score }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:{};", icon_style, time_color)}>{"⏱"}</span>
                <span style={format!("{} color:{};", label_style, time_color)}>{"Time"}</span>
                <span id="timer" style={format!("{} color:{};", value_style, time_color)}>{ props.time_left }</span>
            </div>
            <div style="font-size:11px; opacity:0.7;">{ format!("Reach {} to celebrate", props.win_score) }</div>
        </div>
    }
}
