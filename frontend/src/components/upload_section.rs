use super::super::Model;
use super::super::Msg;
use super::utils::{debounce, first_file};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

const EXAMPLE_IMAGE_SRC: &str = "/assets/example.svg";

pub fn render_example_panel() -> Html {
    html! {
        <div class="example-panel">
            <h3>{"Example Image"}</h3>
            <div class="example-image">
                <img
                    src={EXAMPLE_IMAGE_SRC}
                    alt="Example of mask-wearing detection"
                    width="500"
                    height="375"
                />
                <span class="image-source" title="Image source: Public domain">
                    <i class="fa-solid fa-circle-info"></i>
                </span>
            </div>
            <p class="muted">
                {"This image shows a clear view of people wearing protective face masks in a public area."}
            </p>
        </div>
    }
}

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let busy = model.session.is_busy();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);

        // Allows choosing the same file again after a reset.
        input.set_value("");

        file.map(Msg::ImageChosen)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("image-upload"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <div class="upload-section">
            <input
                type="file"
                id="image-upload"
                accept="image/*"
                style="display: none;"
                disabled={busy}
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, move || trigger_file_input.emit(()))}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-eye"></i>
                    <p><span class="strong">{"Click to upload"}</span>{" or drag and drop"}</p>
                    <p class="file-types">{"PNG, JPG or GIF (MAX. 800x400px)"}</p>
                </div>
            </div>
        </div>
    }
}
