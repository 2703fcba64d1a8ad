use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::static_assets::custom_asset;
use crate::web_api::AppState;

pub const SWAGGER_UI_ROOT: &str = "/swagger-ui/";
pub const SWAGGER_UI_CUSTOM: &str = "/swagger-ui/custom";
pub const SWAGGER_UI_ALIAS: &str = "/swagger-ui-custom";

// 文档页面在自定义资源中的路径，对外即 /custom/swagger-ui-page.html
const DOC_PAGE: &str = "swagger-ui-page.html";

/// 文档页面相关的固定路由
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(SWAGGER_UI_ROOT, get(redirect_to_custom))
        .route(SWAGGER_UI_CUSTOM, get(forward_to_doc_page))
        .route(SWAGGER_UI_ALIAS, get(forward_to_doc_page))
}

/// `/swagger-ui/` 重定向到规范路径
async fn redirect_to_custom() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, SWAGGER_UI_CUSTOM)])
}

/// 服务端转发：同一个请求交给自定义资源处理，与 `/custom/swagger-ui-page.html` 结果一致，客户端不感知
async fn forward_to_doc_page(State(state): State<AppState>, request: Request) -> Response {
    custom_asset(&state.custom_assets, DOC_PAGE, request).await
}
