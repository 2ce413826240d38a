use actix_files::{Files, NamedFile};
use actix_web::{web, HttpResponse};
use shared::{ClientConfig, Route};
use std::path::PathBuf;
use strum::IntoEnumIterator;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf) {
    cfg.service(web::resource("/api/config").route(web::get().to(get_client_config)));

    // Client-side pages all boot from the same document.
    let index = frontend_dir.join("index.html");
    for route in Route::iter() {
        let index = index.clone();
        cfg.service(
            web::resource(route.path()).route(web::get().to(move || serve_index(index.clone()))),
        );
    }

    cfg.service(Files::new("/", frontend_dir));
}

async fn get_client_config(config: web::Data<ClientConfig>) -> HttpResponse {
    HttpResponse::Ok().json(config.get_ref())
}

async fn serve_index(index: PathBuf) -> actix_web::Result<NamedFile> {
    NamedFile::open_async(&index).await.map_err(|e| {
        log::error!("Failed to open {}: {}", index.display(), e);
        e.into()
    })
}
