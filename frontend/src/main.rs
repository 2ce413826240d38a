mod api;
mod components;

use components::{handlers, header, landing, preview_area, results, upload_section, utils};
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{
    ClientConfig, DetectionError, DetectionResult, DetectionSession, Route, SubmissionTicket,
};
use web_sys::DragEvent;
use yew::prelude::*;

// Models
pub struct SelectedImage {
    file: GlooFile,
    // Revoked when dropped, so the session releases it by dropping the image.
    preview_url: ObjectUrl,
}

impl From<GlooFile> for SelectedImage {
    fn from(file: GlooFile) -> Self {
        let preview_url = ObjectUrl::from(file.clone());
        Self { file, preview_url }
    }
}

// Yew msg components
pub enum Msg {
    // Navigation
    Navigate(Route),
    RouteChanged(Route),
    ConfigLoaded(ClientConfig),

    // Session operations
    ImageChosen(GlooFile),
    Submit,
    DetectionFinished(SubmissionTicket, Result<DetectionResult, DetectionError>),
    Reset,

    // Input events
    SetDragging(bool),
    HandleDrop(DragEvent),
}

// Main component
pub struct Model {
    route: Route,
    session: DetectionSession<SelectedImage>,
    detection_url: String,
    is_dragging: bool,
    _popstate_listener: EventListener,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "popstate", move |_| {
            link.send_message(Msg::RouteChanged(utils::current_route()));
        });

        handlers::load_client_config(ctx);

        Self {
            route: utils::current_route(),
            session: DetectionSession::new(),
            detection_url: api::build_time_endpoint().to_string(),
            is_dragging: false,
            _popstate_listener: listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Navigation
            Msg::Navigate(route) => handlers::handle_navigate(self, route),
            Msg::RouteChanged(route) => handlers::handle_route_changed(self, route),
            Msg::ConfigLoaded(config) => handlers::handle_config_loaded(self, config),

            // Session operations
            Msg::ImageChosen(file) => handlers::handle_image_chosen(self, file),
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::DetectionFinished(ticket, outcome) => {
                handlers::handle_detection_finished(self, ticket, outcome)
            }
            Msg::Reset => handlers::handle_reset(self),

            // Input events
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.route {
            Route::Landing => landing::render_landing(ctx),
            Route::Predict => self.render_predict_page(ctx),
        }
    }
}

// Rendering methods
impl Model {
    fn render_predict_page(&self, ctx: &Context<Self>) -> Html {
        html! {
            <main class="predict-page">
                <div class="page-container">
                    { header::render_back_link(ctx) }
                    <div class="card">
                        { header::render_card_header() }
                        <div class="card-content">
                            {
                                if let Some(result) = self.session.result() {
                                    results::render_results(ctx, result)
                                } else {
                                    html! {
                                        <div class="two-column">
                                            { upload_section::render_example_panel() }
                                            <div class="upload-panel">
                                                <h3>{"Upload Your Image"}</h3>
                                                { upload_section::render_upload_section(self, ctx) }
                                                { preview_area::render_preview_area(self, ctx) }
                                            </div>
                                        </div>
                                    }
                                }
                            }
                        </div>
                        <div class="card-footer">
                            { utils::render_error_message(self) }
                        </div>
                    </div>
                </div>
            </main>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
