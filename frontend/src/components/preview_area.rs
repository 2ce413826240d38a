use super::super::{Model, Msg};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();
    let busy = model.session.is_busy();
    let has_image = model.session.image().is_some();

    html! {
        <div id="preview-container">
            { render_selected_image_preview(model) }
            <button
                class="analyze-btn"
                onclick={debounce(300, move || link.send_message(Msg::Submit))}
                disabled={busy || !has_image}
            >
                { render_submit_button_content(busy) }
            </button>
        </div>
    }
}

fn render_selected_image_preview(model: &Model) -> Html {
    match model.session.image() {
        Some(image) => html! {
            <div class="selected-preview">
                <img id="actual-image-preview"
                    src={image.preview_url.to_string()}
                    alt="Selected mask-wearing image"
                    title={image.file.name()} />
            </div>
        },
        None => html! {},
    }
}

fn render_submit_button_content(busy: bool) -> Html {
    if busy {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        html! { <>{"Detect Mask Wearing"}</> }
    }
}
