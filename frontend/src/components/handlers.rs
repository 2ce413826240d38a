use super::super::{Model, Msg, SelectedImage};
use crate::api;
use gloo_file::File as GlooFile;
use shared::{
    ClientConfig, DetectionEndpoint, DetectionError, DetectionResult, Route, SessionError,
    SubmissionTicket,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

use super::utils::first_file;

pub fn handle_navigate(model: &mut Model, route: Route) -> bool {
    if model.route == route {
        return false;
    }

    let pushed = web_sys::window()
        .and_then(|window| window.history().ok())
        .map(|history| history.push_state_with_url(&JsValue::NULL, "", Some(route.path())));
    if let Some(Err(e)) = pushed {
        log::warn!("Failed to push history entry for {}: {:?}", route, e);
    }

    log::info!("Navigating to {}", route);
    model.route = route;
    true
}

pub fn handle_route_changed(model: &mut Model, route: Route) -> bool {
    if model.route == route {
        return false;
    }
    model.route = route;
    true
}

pub fn handle_config_loaded(model: &mut Model, config: ClientConfig) -> bool {
    match DetectionEndpoint::parse(&config.detection_url) {
        Ok(endpoint) => {
            log::info!("Using detection service at {}", endpoint);
            model.detection_url = endpoint.to_string();
        }
        Err(e) => {
            log::error!("Ignoring server-provided config: {}", e);
        }
    }
    false
}

pub fn handle_image_chosen(model: &mut Model, file: GlooFile) -> bool {
    let name = file.name();
    let media_type = file.raw_mime_type();

    match model
        .session
        .select_image(&media_type, move || SelectedImage::from(file))
    {
        Ok(()) => log::info!("Selected image: {}", name),
        Err(e) => log::warn!("Rejected {}: {}", name, e),
    }
    true
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    match model.session.submit() {
        Ok(pending) => {
            let ticket = pending.ticket;
            let file = pending.image.file.clone();
            log::info!("Submitting {} for detection", file.name());
            send_detection_request(ctx, model.detection_url.clone(), ticket, file);
            true
        }
        Err(SessionError::Busy) => false,
        Err(e) => {
            log::warn!("Submit rejected: {}", e);
            true
        }
    }
}

pub fn handle_detection_finished(
    model: &mut Model,
    ticket: SubmissionTicket,
    outcome: Result<DetectionResult, DetectionError>,
) -> bool {
    model.session.complete(ticket, outcome)
}

pub fn handle_reset(model: &mut Model) -> bool {
    model.session.reset();
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file) = event
        .data_transfer()
        .and_then(|data_transfer| data_transfer.files())
        .and_then(|file_list| first_file(&file_list))
    {
        ctx.link().send_message(Msg::ImageChosen(file));
    }

    true
}

pub fn send_detection_request(
    ctx: &Context<Model>,
    url: String,
    ticket: SubmissionTicket,
    file: GlooFile,
) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = api::detect_mask_wearing(&url, &file).await;
            if let Err(e) = &outcome {
                log::error!("Error detecting mask wearing: {}", e);
            }
            link.send_message(Msg::DetectionFinished(ticket, outcome));
        }
    });
}

pub fn load_client_config(ctx: &Context<Model>) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            match api::fetch_client_config().await {
                Ok(config) => link.send_message(Msg::ConfigLoaded(config)),
                Err(e) => log::info!("No runtime config, keeping build-time endpoint: {}", e),
            }
        }
    });
}
