//! Placeholder homepage handlers. Exactly one is wired at `/`, see
//! [`itemhub_infra::HomepageHandler`].

pub const PROJECT_HOMEPAGE: &str = "Welcome to the API homepage";
pub const APP_HOMEPAGE: &str = "Welcome to the API homepage.";

pub async fn home() -> &'static str {
    PROJECT_HOMEPAGE
}

pub async fn app_home() -> &'static str {
    APP_HOMEPAGE
}
