//! Admin UI 文档扩展的共享部分：文档组装逻辑
//!
//! 这里的函数都是纯函数，不做 I/O，每次调用都重新构造并返回相同的数据，
//! 供普通 HTTP 路由和管理端点两条传输路径共同使用。

use serde::{Deserialize, Serialize};

pub mod openapi;

// 文档 JSON 的访问路径
pub const OPENAPI_DOC_URL: &str = "/api/openapi.json";

// API 标题，OpenAPI 文档与 Swagger UI 配置共用
pub const API_TITLE: &str = "Spring Boot Admin API";

pub const UI_DESCRIPTION: &str = "Custom Swagger UI for Spring Boot Admin";

/// Swagger UI 页面配置
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub url: String,         // 文档 JSON 地址
    pub title: String,       // 页面标题
    pub description: String, // 页面描述
}

/// 构造 Swagger UI 配置
pub fn describe_ui_config() -> UiConfig {
    UiConfig {
        url: OPENAPI_DOC_URL.to_string(),
        title: API_TITLE.to_string(),
        description: UI_DESCRIPTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_config_values() {
        let config = describe_ui_config();
        assert_eq!(config.url, "/api/openapi.json");
        assert_eq!(config.title, "Spring Boot Admin API");
        assert_eq!(config.description, "Custom Swagger UI for Spring Boot Admin");
    }

    #[test]
    fn test_ui_config_json_shape() {
        let json = serde_json::to_string(&describe_ui_config()).unwrap();
        assert_eq!(
            json,
            r#"{"url":"/api/openapi.json","title":"Spring Boot Admin API","description":"Custom Swagger UI for Spring Boot Admin"}"#
        );
    }

    #[test]
    fn test_ui_config_is_deterministic() {
        assert_eq!(describe_ui_config(), describe_ui_config());
    }
}
