//! 手工构造的 OpenAPI 文档
//!
//! 路径列表是固定的示例，不从运行中的路由推导。

use serde_json::Value;
use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::info::{ContactBuilder, InfoBuilder, LicenseBuilder};
use utoipa::openapi::path::{OperationBuilder, PathItem, PathItemBuilder, PathItemType, PathsBuilder};
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{ObjectBuilder, Schema, SchemaType};
use utoipa::openapi::server::{Server, ServerBuilder};
use utoipa::openapi::{OpenApi, OpenApiBuilder};

use crate::API_TITLE;

pub const API_VERSION: &str = "1.0.0";
pub const API_DESCRIPTION: &str = "API documentation for Spring Boot Admin with custom Swagger UI";

pub const CONTACT_NAME: &str = "Spring Boot Admin Team";
pub const CONTACT_EMAIL: &str = "admin@example.com";
pub const LICENSE_NAME: &str = "MIT License";
pub const LICENSE_URL: &str = "https://opensource.org/licenses/MIT";

const JSON_CONTENT_TYPE: &str = "application/json";

/// 构造完整的 API 描述文档
pub fn describe_api() -> OpenApi {
    let info = InfoBuilder::new()
        .title(API_TITLE)
        .description(Some(API_DESCRIPTION))
        .version(API_VERSION)
        .contact(Some(
            ContactBuilder::new()
                .name(Some(CONTACT_NAME))
                .email(Some(CONTACT_EMAIL))
                .build(),
        ))
        .license(Some(
            LicenseBuilder::new()
                .name(LICENSE_NAME)
                .url(Some(LICENSE_URL))
                .build(),
        ))
        .build();

    let paths = PathsBuilder::new()
        .path("/api/health", health_path())
        .path("/api/status", status_path())
        .path("/api/swagger-ui-config", swagger_ui_config_path())
        .build();

    OpenApiBuilder::new()
        .info(info)
        .servers(Some(servers()))
        .paths(paths)
        .build()
}

// 开发与生产两个服务器，顺序固定
fn servers() -> Vec<Server> {
    vec![
        ServerBuilder::new()
            .url("http://localhost:8080")
            .description(Some("Development server"))
            .build(),
        ServerBuilder::new()
            .url("https://api.example.com")
            .description(Some("Production server"))
            .build(),
    ]
}

fn health_path() -> PathItem {
    example_get(
        "Health Check",
        "Returns the health status of the application",
        "Application is healthy",
        r#"{"status":"UP"}"#,
    )
}

fn status_path() -> PathItem {
    example_get(
        "Application Status",
        "Returns detailed status information about the application",
        "Status information retrieved successfully",
        r#"{"status":"UP","uptime":"2h 30m"}"#,
    )
}

fn swagger_ui_config_path() -> PathItem {
    example_get(
        "Swagger UI Configuration",
        "Returns configuration for the Swagger UI",
        "Configuration retrieved successfully",
        r#"{"url":"/api/openapi.json","title":"Spring Boot Admin API"}"#,
    )
}

/// 只有一个 GET 操作的路径项，200 响应的示例以字符串形式放在 schema 的 example 中
fn example_get(
    summary: &str,
    description: &str,
    response_description: &str,
    example: &str,
) -> PathItem {
    let schema = ObjectBuilder::new()
        .schema_type(SchemaType::String)
        .example(Some(Value::String(example.to_string())))
        .build();

    let response = ResponseBuilder::new()
        .description(response_description)
        .content(
            JSON_CONTENT_TYPE,
            ContentBuilder::new().schema(Schema::Object(schema)).build(),
        )
        .build();

    let operation = OperationBuilder::new()
        .summary(Some(summary))
        .description(Some(description))
        .response("200", response)
        .build();

    PathItemBuilder::new()
        .operation(PathItemType::Get, operation)
        .build()
}
