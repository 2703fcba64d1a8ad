//! 管理端点
//!
//! 以 actuator 的形式暴露只读端点，宿主监控应用通过索引发现这些端点，
//! 存在 `openapi` 或 `swaggeruiconfig` 时启用 API 文档视图。

use admin_ui_common::{describe_ui_config, openapi::describe_api};
use anyhow::{anyhow, Result};
use axum::{
    extract::{Path, State},
    http::{header, uri::Authority, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use log::{debug, error};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type ReadOperation = Box<dyn Fn() -> serde_json::Result<Vec<u8>> + Send + Sync>;

/// 一个只读管理端点：id 加上返回可序列化数据的读操作
pub struct ManagementEndpoint {
    id: String,
    read: ReadOperation,
}

impl ManagementEndpoint {
    pub fn new<T, F>(id: impl Into<String>, operation: F) -> Self
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            // 与 axum 的 Json 使用同样的紧凑序列化，保证两条路径输出字节一致
            read: Box::new(move || serde_json::to_vec(&operation())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn read(&self) -> serde_json::Result<Vec<u8>> {
        (self.read)()
    }
}

impl fmt::Debug for ManagementEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementEndpoint")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// 健康状态
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self { status: "UP" }
    }
}

/// 已注册的管理端点，创建后不可变
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    endpoints: Arc<BTreeMap<String, ManagementEndpoint>>,
}

impl EndpointRegistry {
    pub fn new(endpoints: Vec<ManagementEndpoint>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for endpoint in endpoints {
            validate_endpoint_id(endpoint.id())?;
            if map.contains_key(endpoint.id()) {
                return Err(anyhow!("管理端点 id 重复: {}", endpoint.id()));
            }
            map.insert(endpoint.id().to_string(), endpoint);
        }

        Ok(Self {
            endpoints: Arc::new(map),
        })
    }

    /// 默认端点：openapi、swaggeruiconfig、health
    pub fn with_defaults() -> Result<Self> {
        Self::new(vec![
            ManagementEndpoint::new("openapi", describe_api),
            ManagementEndpoint::new("swaggeruiconfig", describe_ui_config),
            ManagementEndpoint::new("health", HealthStatus::up),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&ManagementEndpoint> {
        self.endpoints.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }
}

/// 端点 id 只允许 ASCII 字母、数字和 `-`，`self` 保留给索引
fn validate_endpoint_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(anyhow!("管理端点 id 不能为空"));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(anyhow!("无效的管理端点 id: {}", id));
    }
    if id == "self" {
        return Err(anyhow!("管理端点 id 不能为 self"));
    }
    Ok(())
}

/// 索引中的链接
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub templated: bool,
}

/// 管理端点索引
#[derive(Serialize, Debug)]
pub struct EndpointIndex {
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

/// 生成索引，`base_url` 是管理端点的基础地址
pub fn build_index(registry: &EndpointRegistry, base_url: &str) -> EndpointIndex {
    let link = |href: String| Link {
        href,
        templated: false,
    };

    let mut links = BTreeMap::new();
    links.insert("self".to_string(), link(base_url.to_string()));
    for id in registry.ids() {
        links.insert(id.to_string(), link(format!("{}/{}", base_url, id)));
    }

    EndpointIndex { links }
}

#[derive(Clone)]
struct ManagementState {
    registry: EndpointRegistry,
    base_path: Arc<str>,
}

/// 管理端点路由，由调用方嵌套到 `base_path` 下
pub fn create_router(registry: EndpointRegistry, base_path: &str) -> Router {
    let state = ManagementState {
        registry,
        base_path: Arc::from(base_path),
    };

    Router::new()
        .route("/", get(get_index))
        .route("/:id", get(read_endpoint))
        .with_state(state)
}

async fn get_index(State(state): State<ManagementState>, headers: HeaderMap) -> Json<EndpointIndex> {
    let base_url = index_base_url(&headers, &state.base_path);
    Json(build_index(&state.registry, &base_url))
}

// Host 与 x-forwarded-proto 来自前置代理，只在格式合法时拼成绝对地址，否则只返回路径
fn index_base_url(headers: &HeaderMap, base_path: &str) -> String {
    let Some(host) = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.contains('@') && h.parse::<Authority>().is_ok())
    else {
        return base_path.to_string();
    };

    let scheme = match headers.get("x-forwarded-proto").map(|v| v.to_str()) {
        None => "http",
        Some(Ok("http")) => "http",
        Some(Ok("https")) => "https",
        Some(_) => return base_path.to_string(),
    };

    format!("{}://{}{}", scheme, host, base_path)
}

async fn read_endpoint(
    State(state): State<ManagementState>,
    Path(id): Path<String>,
) -> Result<Response, StatusCode> {
    let endpoint = state.registry.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    debug!("读取管理端点: {}", id);

    let body = endpoint.read().map_err(|e| {
        error!("管理端点 {} 序列化失败: {}", id, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
