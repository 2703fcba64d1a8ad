use admin_ui_common::{describe_ui_config, openapi::describe_api, UiConfig, OPENAPI_DOC_URL};
use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use log::{debug, info};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::Config;

use crate::management::{self, EndpointRegistry};
use crate::server_config::ServerConfig;
use crate::static_assets::{serve_custom_asset, serve_vendor_asset, CustomAssetSource};
use crate::view_forward;

// 应用状态，只读共享
#[derive(Clone)]
pub struct AppState {
    pub custom_assets: Arc<CustomAssetSource>,
    pub swagger_config: Arc<Config<'static>>,
}

impl AppState {
    pub fn new(custom_assets: CustomAssetSource) -> Self {
        Self {
            custom_assets: Arc::new(custom_assets),
            swagger_config: Arc::new(Config::from(OPENAPI_DOC_URL)),
        }
    }
}

/// 获取 OpenAPI 文档
pub async fn get_openapi_doc() -> Json<OpenApi> {
    debug!("生成 OpenAPI 文档");
    Json(describe_api())
}

/// 获取 Swagger UI 配置
pub async fn get_swagger_ui_config() -> Json<UiConfig> {
    Json(describe_ui_config())
}

// 创建路由器
pub fn create_router(config: &ServerConfig) -> Result<Router> {
    let state = AppState::new(config.custom_assets.clone());

    let mut router: Router = Router::new()
        // 文档接口
        .route("/api/openapi.json", get(get_openapi_doc))
        .route("/api/swagger-ui-config", get(get_swagger_ui_config))
        // 文档页面的重定向与转发
        .merge(view_forward::routes())
        // 自定义静态资源
        .route("/custom/*path", get(serve_custom_asset))
        // Swagger UI 库资源，其余路径 404
        .fallback(serve_vendor_asset)
        .with_state(state);

    if let Some(base_path) = config.management_path.as_deref() {
        let registry = EndpointRegistry::with_defaults().context("初始化管理端点失败")?;
        router = router.nest(base_path, management::create_router(registry, base_path));
    }

    // 宿主监控界面可能跨域访问
    Ok(router.layer(CorsLayer::permissive()))
}

pub async fn start_web_server(config: ServerConfig) -> Result<()> {
    let app = create_router(&config)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("无法监听端口 {}", config.port))?;

    info!("Web 服务启动在端口 {}", config.port);
    info!("文档页面: http://localhost:{}/swagger-ui-custom", config.port);
    info!("OpenAPI 文档: http://localhost:{}{}", config.port, OPENAPI_DOC_URL);
    if let Some(base_path) = config.management_path.as_deref() {
        info!("管理端点: http://localhost:{}{}", config.port, base_path);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        log::warn!("监听 Ctrl-C 信号失败: {}", e);
        return;
    }
    info!("收到 Ctrl-C 信号，正在退出...");
}
