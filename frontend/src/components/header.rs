use super::super::{Model, Msg};
use shared::Route;
use yew::prelude::*;

pub fn render_back_link(ctx: &Context<Model>) -> Html {
    let onclick = ctx.link().callback(|e: MouseEvent| {
        e.prevent_default();
        Msg::Navigate(Route::Landing)
    });

    html! {
        <a href={Route::Landing.path()} class="back-link" {onclick}>
            <i class="fa-solid fa-arrow-left"></i>{" Back to Home"}
        </a>
    }
}

/// Renders the detection card header
pub fn render_card_header() -> Html {
    html! {
        <header class="card-header">
            <h1 class="card-title">{"Mask Wearing Detection"}</h1>
            <p class="card-description">
                {"Upload an image to assess mask-wearing compliance with our AI-powered detection tool."}
            </p>
        </header>
    }
}
