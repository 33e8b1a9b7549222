//! Route tables for the two apps.
//!
//! Each app mounts its own pages plus the shared `/auth` scope.

use actix_web::web;

use crate::inbound::http::{news, notes, users};

/// Account pages under `/auth`.
pub fn configure_accounts(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(users::login_form)
            .service(users::login)
            .service(users::logout)
            .service(users::signup_form)
            .service(users::signup),
    );
}

/// Notes app pages.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bulletin::inbound::http::routes::configure_notes;
///
/// let app = App::new().configure(configure_notes);
/// ```
pub fn configure_notes(cfg: &mut web::ServiceConfig) {
    configure_accounts(cfg);
    cfg.service(notes::home)
        .service(notes::list)
        .service(notes::add_form)
        .service(notes::add)
        .service(notes::done)
        .service(notes::detail)
        .service(notes::edit_form)
        .service(notes::edit)
        .service(notes::delete_form)
        .service(notes::delete);
}

/// News app pages.
pub fn configure_news(cfg: &mut web::ServiceConfig) {
    configure_accounts(cfg);
    cfg.service(news::home)
        .service(news::detail)
        .service(news::add_comment)
        .service(news::edit_form)
        .service(news::edit)
        .service(news::delete_form)
        .service(news::delete);
}
