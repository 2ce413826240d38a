use super::super::{Model, Msg};
use super::utils::debounce;
use shared::DetectionResult;
use yew::prelude::*;

pub fn render_results(ctx: &Context<Model>, result: &DetectionResult) -> Html {
    let link = ctx.link().clone();
    let threshold = result
        .threshold
        .as_ref()
        .map_or_else(|| "n/a".to_string(), |threshold| threshold.to_string());

    html! {
        <div class="results-container">
            <div class="result-image">
                <img
                    src={result.renderable_image.clone()}
                    alt="Analyzed mask-wearing image"
                    width="416"
                    height="416"
                />
            </div>
            <p class="result-threshold">{ format!("Threshold: {}", threshold) }</p>
            <hr class="separator" />
            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={debounce(300, move || link.send_message(Msg::Reset))}
                >
                    <i class="fa-solid fa-rotate"></i>{" Analyze Another Image"}
                </button>
            </div>
        </div>
    }
}
