//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod listings;
pub mod property_requests;
pub mod session;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` route.
///
/// Static segments such as `/housing/all` and `/housing/create` are
/// registered ahead of `/housing/{id}`. Rejected JSON bodies and path
/// segments answer with the `invalid_request` error payload.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(validation::json_config())
            .app_data(validation::path_config())
            .service(users::register)
            .service(users::login)
            .service(users::logout)
            .service(users::auth_status)
            .service(users::profile)
            .service(property_requests::create_request)
            .service(property_requests::my_requests)
            .service(property_requests::transition_request)
            .service(listings::list_listings)
            .service(listings::create_listing)
            .service(listings::get_listing)
            .service(listings::update_listing)
            .service(listings::delete_listing),
    );
}

/// Register the health probes.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ready).service(health::live);
}
