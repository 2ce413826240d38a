use super::super::{Model, Msg};
use super::utils::debounce;
use shared::Route;
use yew::prelude::*;

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "fa-eye",
        "Easy to Use",
        "Simply upload an image, and let our AI analyze it for mask-wearing detection.",
    ),
    (
        "fa-triangle-exclamation",
        "Early Detection",
        "Catch potential risks early. Regular screenings help ensure safety and compliance with mask-wearing.",
    ),
    (
        "fa-microscope",
        "AI-Powered",
        "Our advanced AI model is trained on thousands of images to provide precise mask-wearing detection.",
    ),
];

pub fn render_landing(ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <main class="landing-page">
            <div class="page-container">
                <header class="app-header">
                    <h1>{"Mask Wearing Detection"}</h1>
                    <p class="subtitle">
                        {"Detect Mask-Wearing Early: Leverage Our AI-Powered Tool for Instant Assessment."}
                    </p>
                </header>

                <div class="feature-grid">
                    { for FEATURES.iter().map(|(icon, title, text)| html! {
                        <div class="card feature-card">
                            <i class={classes!("fa-solid", *icon, "feature-icon")}></i>
                            <h2 class="card-title">{ *title }</h2>
                            <p class="muted">{ *text }</p>
                        </div>
                    })}
                </div>

                <div class="cta">
                    <button
                        class="analyze-btn cta-btn"
                        onclick={debounce(300, move || link.send_message(Msg::Navigate(Route::Predict)))}
                    >
                        {"Start Your Assessment"}
                    </button>
                </div>
            </div>
        </main>
    }
}
