use yew::prelude::*;

use crate::model::{Feedback, FeedbackKind};

#[derive(Properties, PartialEq, Clone)]
pub struct FeedbackLayerProps {
    pub items: Vec<Feedback>,
}

/// Fly-text and splash effects at the viewport position of the caught drop.
#[function_component]
pub fn FeedbackLayer(props: &FeedbackLayerProps) -> Html {
    html! {<>
        { for props.items.iter().map(|f| match &f.kind {
            FeedbackKind::FlyText { text, tone } => html! {
                <div key={f.id} class="fly" style={format!("left:{:.0}px; top:{:.0}px; color:{};", f.x, f.y, tone.color())}>
                    { text.clone() }
                </div>
            },
            FeedbackKind::Splash => html! {
                <div key={f.id} class="splash" style={format!("left:{:.0}px; top:{:.0}px;", f.x, f.y)} />
            },
        }) }
    </>}
}
