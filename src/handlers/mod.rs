pub mod admin;
pub mod auth;
pub mod contracts;
pub mod dashboard;
pub mod lands;
pub mod notifications;
pub mod profiles;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth/profile routes (JWT via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(auth::me))
            .route("/profile", web::put().to(auth::update_profile)),
    );

    // ── Admin routes ──
    cfg.service(
        web::scope("/profiles")
            .route("", web::get().to(profiles::get_profiles))
            .route("/{id}/approval", web::put().to(profiles::set_approval)),
    );
    cfg.service(web::resource("/admin/stats").route(web::get().to(admin::stats)));

    // ── Per-role dashboard ──
    cfg.service(web::resource("/dashboard").route(web::get().to(dashboard::summary)));

    // ── Land routes (literal paths before the {id} catch-all) ──
    cfg.service(
        web::scope("/lands")
            .route("", web::get().to(lands::get_all_lands))
            .route("", web::post().to(lands::create_land))
            .route("/mine", web::get().to(lands::get_my_lands))
            .route("/available", web::get().to(lands::get_available_lands))
            .route("/{id}", web::get().to(lands::get_land))
            .route("/{id}", web::put().to(lands::update_land))
            .route("/{id}", web::delete().to(lands::delete_land)),
    );

    // ── Contract routes ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("", web::post().to(contracts::create_contract))
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}/status", web::put().to(contracts::update_status)),
    );

    // ── Notification routes ──
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(notifications::get_notifications))
            .route("/{id}/read", web::put().to(notifications::mark_read)),
    );
}
