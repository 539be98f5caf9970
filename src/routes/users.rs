use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::dto::users::UsersResponse;
use crate::models::config::ServerConfig;
use crate::pagination::{RequestContext, RouteMap};
use crate::repository::DieselRepository;
use crate::services::users::load_users_page;

/// Name under which [`api_v1_users`] is registered.
pub const USERS_ROUTE: &str = "users";

#[get("/v1/users", name = "users")]
pub async fn api_v1_users(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    router: web::Data<RouteMap>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let request: &dyn RequestContext = &req;

    match load_users_page(
        repo.get_ref(),
        Some(request),
        router.get_ref(),
        server_config.default_page_size,
    ) {
        Ok(data) => HttpResponse::Ok().json(UsersResponse::from(data)),
        Err(e) => {
            log::error!("Failed to list users: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
