use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use crate::model::{DROP_SIZE_PX, FALL_TICK_MS, Mode, RoundAction, RoundState, TIMER_TICK_MS, WaterDrop};
use crate::util::{Interval, rand_unit};

/// Used when the area element is not mounted yet.
const FALLBACK_AREA_HEIGHT: f64 = 480.0;

#[derive(Properties, PartialEq, Clone)]
pub struct GameAreaProps {
    pub round: UseReducerHandle<RoundState>,
}

#[function_component(GameArea)]
pub fn game_area(props: &GameAreaProps) -> Html {
    let area_ref = use_node_ref();

    // Round timers live exactly as long as the round: the effect re-runs (and the
    // previous intervals are dropped) whenever `active` or the round id changes.
    {
        let dispatcher = props.round.dispatcher();
        let area_ref = area_ref.clone();
        let mode = props.round.mode;
        use_effect_with(
            (props.round.active, props.round.round_id),
            move |&(active, round_id)| {
                let timers = if active {
                    log::debug!("starting timers for round {}", round_id);
                    start_round_timers(dispatcher, area_ref, mode)
                } else {
                    Vec::new()
                };
                move || drop(timers)
            },
        );
    }

    let dispatcher = props.round.dispatcher();
    let drops = props.round.drops.iter().map(|d| render_drop(d, &dispatcher));

    html! {
        <div id="game-area" ref={area_ref} style="position:relative; overflow:hidden; width:100%; height:60vh; min-height:320px; background:linear-gradient(#e8f6ff, #bfe3ff); border:2px solid #2E9DF7; border-radius:12px; user-select:none;">
            { for drops }
            if !props.round.active && props.round.drops.is_empty() {
                <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; opacity:0.6; font-size:14px;">
                    {"Press Start, then click the clean drops. Avoid the polluted ones!"}
                </div>
            }
        </div>
    }
}

fn start_round_timers(
    dispatcher: UseReducerDispatcher<RoundState>,
    area_ref: NodeRef,
    mode: Mode,
) -> Vec<Interval> {
    let timer = {
        let d = dispatcher.clone();
        Interval::new(TIMER_TICK_MS, move || d.dispatch(RoundAction::TickSecond))
    };
    let spawner = {
        let d = dispatcher.clone();
        Interval::new(mode.profile().spawn_interval_ms, move || {
            d.dispatch(RoundAction::Spawn {
                kind_roll: rand_unit(),
                speed_roll: rand_unit(),
                x_roll: rand_unit(),
            })
        })
    };
    let fall = {
        let d = dispatcher;
        Interval::new(FALL_TICK_MS, move || {
            let area_height = area_ref
                .cast::<HtmlElement>()
                .map(|el| el.client_height() as f64)
                .unwrap_or(FALLBACK_AREA_HEIGHT);
            d.dispatch(RoundAction::Fall { area_height })
        })
    };
    [timer, spawner, fall]
        .into_iter()
        .filter_map(|t| match t {
            Ok(t) => Some(t),
            Err(e) => {
                log::error!("failed to start round timer: {}", e);
                None
            }
        })
        .collect()
}

fn render_drop(d: &WaterDrop, dispatcher: &UseReducerDispatcher<RoundState>) -> Html {
    let onclick = {
        let dispatcher = dispatcher.clone();
        let id = d.id;
        Callback::from(move |e: MouseEvent| {
            let el: Element = e.target_unchecked_into();
            let r = el.get_bounding_client_rect();
            dispatcher.dispatch(RoundAction::Click {
                id,
                x: r.left() + r.width() / 2.0,
                y: r.top() + r.height() / 2.0,
            });
        })
    };
    let (kind, fill, glyph) = if d.polluted {
        ("polluted", "#7a5c3a", "☠")
    } else {
        ("clean", "#2E9DF7", "")
    };
    html! {
        <div
            key={d.id}
            class={classes!("drop", kind)}
            onclick={onclick}
            style={format!(
                "position:absolute; left:max(0px, calc((100% - {size}px) * {frac:.4})); top:{y:.1}px; width:{size}px; height:{size}px; background:{fill}; border-radius:50% 50% 50% 50% / 60% 60% 40% 40%; cursor:pointer; display:flex; align-items:center; justify-content:center; color:#fff; font-size:18px; box-shadow:0 2px 6px rgba(0,0,0,0.25);",
                size = DROP_SIZE_PX,
                frac = d.x_frac,
                y = d.y,
                fill = fill,
            )}
        >{ glyph }</div>
    }
}
