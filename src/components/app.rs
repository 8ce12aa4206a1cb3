use super::{
    confetti_canvas::ConfettiCanvas, controls_panel::ControlsPanel, feedback_layer::FeedbackLayer,
    game_area::GameArea, message_banner::MessageBanner, stats_panel::StatsPanel,
};
use crate::audio::AudioManager;
use crate::model::{Mode, RoundAction, RoundState};
use crate::settings::Settings;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(Settings::load);
    let round = {
        let mode = settings.mode;
        use_reducer(move || RoundState::new(mode))
    };
    let audio = use_mut_ref(AudioManager::new);

    // Persist settings & keep the mute flag in sync
    {
        let audio = audio.clone();
        use_effect_with(*settings, move |s| {
            audio.borrow_mut().set_muted(!s.sound_enabled);
            if let Err(e) = s.save() {
                log::warn!("settings not saved: {}", e);
            }
            || ()
        });
    }

    // Play whatever the last click queued
    {
        let audio = audio.clone();
        let cues = round.pending_cues.clone();
        use_effect_with(round.cue_seq, move |seq| {
            if *seq > 0 {
                let mut audio = audio.borrow_mut();
                for cue in cues {
                    audio.play(cue);
                }
            }
            || ()
        });
    }

    let on_start = {
        let round = round.clone();
        Callback::from(move |_: ()| round.dispatch(RoundAction::Start))
    };
    let on_reset = {
        let round = round.clone();
        Callback::from(move |_: ()| round.dispatch(RoundAction::Reset))
    };
    let on_select_mode = {
        let round = round.clone();
        let settings = settings.clone();
        Callback::from(move |mode: Mode| {
            settings.set(Settings { mode, ..*settings });
            round.dispatch(RoundAction::SelectMode(mode));
        })
    };
    let on_toggle_sound = {
        let settings = settings.clone();
        Callback::from(move |_: ()| {
            settings.set(Settings {
                sound_enabled: !settings.sound_enabled,
                ..*settings
            })
        })
    };

    html! {
        <div style="max-width:900px; margin:0 auto; padding:16px; display:flex; flex-direction:column; gap:12px; font-family:system-ui, sans-serif;">
            <h1 style="margin:0; color:#2E9DF7; text-align:center;">{"Clean Water Catch"}</h1>
            <div style="display:flex; justify-content:space-between; align-items:center; gap:12px; flex-wrap:wrap;">
                <StatsPanel
                    score={round.score}
                    time_left={round.time_left}
                    win_score={round.profile().win_score}
                />
                <ControlsPanel
                    active={round.active}
                    mode={round.selected_mode}
                    sound_enabled={settings.sound_enabled}
                    {on_start}
                    {on_reset}
                    {on_select_mode}
                    {on_toggle_sound}
                />
            </div>
            <MessageBanner banner={round.banner.clone()} />
            <GameArea round={round.clone()} />
            <FeedbackLayer items={round.feedback.clone()} />
            <ConfettiCanvas round_id={round.round_id} celebrating={round.celebrating()} />
        </div>
    }
}
