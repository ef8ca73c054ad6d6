use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::catalog::home,
        api::catalog::catalog,
        api::catalog::catalog_search,
        api::books::get_book,
        api::images::get_image,
        api::auth::log_in,
    ),
    tags(
        (name = "bookswap", description = "Book exchange marketplace API")
    )
)]
pub struct ApiDoc;
