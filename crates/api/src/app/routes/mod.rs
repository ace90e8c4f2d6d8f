use axum::{routing::get, Router};

use itemhub_infra::HomepageHandler;

use crate::app::errors;

pub mod admin;
pub mod api;
pub mod home;
pub mod items;

/// Top-level routing table: homepage, `/api/`, `/admin/`, JSON 404 otherwise.
pub fn router(homepage: HomepageHandler) -> Router {
    let homepage_route = match homepage {
        HomepageHandler::Project => get(home::home),
        HomepageHandler::App => get(home::app_home),
    };

    Router::new()
        .route("/", homepage_route)
        .merge(api::router())
        .merge(admin::router())
        .fallback(errors::not_found)
}
