use yew::prelude::*;

use crate::model::Banner;

#[derive(Properties, PartialEq, Clone)]
pub struct MessageBannerProps {
    pub banner: Banner,
}

#[function_component]
pub fn MessageBanner(props: &MessageBannerProps) -> Html {
    html! {
        <div id="message" style={format!("min-height:24px; font-size:17px; font-weight:600; text-align:center; color:{};", props.banner.tone.color())}>
            { props.banner.text.clone() }
        </div>
    }
}
