use actix_web::web;

pub mod backend_health;
pub mod scrims;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Scrim routes (require authentication)
    cfg.service(
        web::scope("/scrims")
            .wrap(AuthMiddleware)
            .service(scrims::propose_scrim)
            .service(scrims::search_open_scrims)
            .service(scrims::my_scrims)
            .service(scrims::respond_to_request)
            .service(scrims::get_scrim)
            .service(scrims::request_scrim)
            .service(scrims::cancel_scrim)
            .service(scrims::complete_scrim),
    );
}
