use axum::{
    extract::{Request, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use log::error;
use mime_guess::from_path;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use utoipa_swagger_ui::Config;

use crate::web_api::AppState;

/// 自定义资源的 URL 前缀
pub const CUSTOM_ASSETS_PREFIX: &str = "/custom";

/// Swagger UI 库资源的 URL 前缀
pub const VENDOR_ASSETS_PREFIX: &str = "/swagger-ui/";

// static/custom 在编译时打包进二进制，与启动时的工作目录无关
#[derive(RustEmbed)]
#[folder = "static/custom/"]
struct BundledAssets;

/// 自定义资源的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomAssetSource {
    /// 打包进二进制的 static/custom
    Bundled,
    /// 启动参数指定的磁盘目录
    Directory(PathBuf),
}

/// `/custom/**`：按来源取文件，找不到时 404
pub async fn serve_custom_asset(State(state): State<AppState>, request: Request) -> Response {
    let Some(file_path) = request
        .uri()
        .path()
        .strip_prefix(CUSTOM_ASSETS_PREFIX)
        .and_then(|p| p.strip_prefix('/'))
        .map(str::to_string)
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    custom_asset(&state.custom_assets, &file_path, request).await
}

/// 从自定义资源中取出 `file_path`（相对路径，不带前导 `/`）
pub async fn custom_asset(
    source: &CustomAssetSource,
    file_path: &str,
    request: Request,
) -> Response {
    if file_path.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }

    match source {
        CustomAssetSource::Bundled => bundled_asset(file_path),
        CustomAssetSource::Directory(dir) => directory_asset(dir, file_path, request).await,
    }
}

fn bundled_asset(file_path: &str) -> Response {
    match BundledAssets::get(file_path) {
        Some(content) => (
            [(
                header::CONTENT_TYPE,
                from_path(file_path).first_or_octet_stream().to_string(),
            )],
            content.data.into_owned(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// 请求改写成目录内的相对路径后交给 ServeDir，条件请求头照常生效
async fn directory_asset(dir: &Path, file_path: &str, mut request: Request) -> Response {
    let Ok(uri) = format!("/{}", file_path).parse::<Uri>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    *request.uri_mut() = uri;

    match ServeDir::new(dir).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// 路由兜底：`/swagger-ui/**` 从打包进二进制的 Swagger UI 发行包中取文件，其余一律 404
pub async fn serve_vendor_asset(State(state): State<AppState>, uri: Uri) -> Response {
    vendor_asset(uri.path(), &state.swagger_config)
}

fn vendor_asset(path: &str, config: &Arc<Config<'static>>) -> Response {
    let Some(file_path) = path
        .strip_prefix(VENDOR_ASSETS_PREFIX)
        .filter(|p| !p.is_empty())
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match utoipa_swagger_ui::serve(file_path, Arc::clone(config)) {
        Ok(Some(file)) => (
            [(header::CONTENT_TYPE, file.content_type)],
            file.bytes.into_owned(),
        )
            .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("读取 Swagger UI 资源 {} 失败: {}", file_path, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
