use anyhow::{anyhow, Result};
use std::path::PathBuf;

use crate::static_assets::CustomAssetSource;

/// 默认的管理端点基础路径
pub const DEFAULT_MANAGEMENT_PATH: &str = "/actuator";

// 固定路由占用的前缀，管理端点不能挂在这些路径上或其下
const RESERVED_PREFIXES: [&str; 4] = ["/api", "/custom", "/swagger-ui", "/swagger-ui-custom"];

/// Web 服务运行配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 监听端口
    pub port: u16,
    /// `/custom/**` 的资源来源
    pub custom_assets: CustomAssetSource,
    /// 管理端点基础路径，`None` 表示不挂载管理端点
    pub management_path: Option<String>,
}

impl ServerConfig {
    /// 校验并创建配置，`custom_dir` 为 `None` 时使用打包进二进制的资源
    pub fn new(
        port: u16,
        custom_dir: Option<PathBuf>,
        management_path: Option<String>,
    ) -> Result<Self> {
        validate_port(port)?;
        if let Some(path) = management_path.as_deref() {
            validate_management_path(path)?;
        }

        let custom_assets = match custom_dir {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(anyhow!("自定义资源目录不存在: {}", dir.display()));
                }
                CustomAssetSource::Directory(dir)
            }
            None => CustomAssetSource::Bundled,
        };

        Ok(Self {
            port,
            custom_assets,
            management_path: management_path.map(|p| p.trim_end_matches('/').to_string()),
        })
    }
}

/// 验证端口范围
pub fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        return Err(anyhow!("端口号不能为 0"));
    }
    Ok(())
}

/// 验证管理端点路径：必须以 `/` 开头，不能是根路径，也不能与固定路由冲突
pub fn validate_management_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(anyhow!("管理端点路径必须以 / 开头: {}", path));
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(anyhow!("管理端点路径不能为根路径"));
    }
    if path.contains(':') || path.contains('*') {
        return Err(anyhow!("管理端点路径不能包含路由参数: {}", path));
    }
    if let Some(reserved) = RESERVED_PREFIXES.iter().find(|reserved| {
        trimmed == **reserved
            || trimmed
                .strip_prefix(**reserved)
                .is_some_and(|rest| rest.starts_with('/'))
    }) {
        return Err(anyhow!(
            "管理端点路径 {} 与固定路由 {} 冲突",
            path,
            reserved
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(validate_port(80).is_ok());
        assert!(validate_port(8080).is_ok());
        assert!(validate_port(65535).is_ok());
        assert!(validate_port(0).is_err());
    }

    #[test]
    fn test_management_path_validation() {
        assert!(validate_management_path("/actuator").is_ok());
        assert!(validate_management_path("/manage/admin").is_ok());
        assert!(validate_management_path("actuator").is_err());
        assert!(validate_management_path("/").is_err());
        assert!(validate_management_path("/:id").is_err());
        assert!(validate_management_path("/a/*rest").is_err());

        // 与固定路由冲突
        assert!(validate_management_path("/api").is_err());
        assert!(validate_management_path("/api/").is_err());
        assert!(validate_management_path("/api/actuator").is_err());
        assert!(validate_management_path("/custom").is_err());
        assert!(validate_management_path("/custom/admin").is_err());
        assert!(validate_management_path("/swagger-ui").is_err());
        assert!(validate_management_path("/swagger-ui/custom").is_err());
        assert!(validate_management_path("/swagger-ui-custom").is_err());

        // 只是名字相近，不冲突
        assert!(validate_management_path("/apis").is_ok());
        assert!(validate_management_path("/customs").is_ok());
        assert!(validate_management_path("/swagger-ui-admin").is_ok());
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = ServerConfig::new(8080, None, Some("/actuator/".to_string())).unwrap();
        assert_eq!(config.management_path.as_deref(), Some("/actuator"));
    }

    #[test]
    fn test_config_without_management() {
        let config = ServerConfig::new(8080, None, None).unwrap();
        assert!(config.management_path.is_none());
    }

    #[test]
    fn test_config_defaults_to_bundled_assets() {
        let config = ServerConfig::new(8080, None, None).unwrap();
        assert_eq!(config.custom_assets, CustomAssetSource::Bundled);
    }

    #[test]
    fn test_config_custom_dir_override() {
        let dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static/custom"));
        let config = ServerConfig::new(8080, Some(dir.clone()), None).unwrap();
        assert_eq!(config.custom_assets, CustomAssetSource::Directory(dir));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(ServerConfig::new(0, None, None).is_err());
        assert!(ServerConfig::new(8080, None, Some("/".to_string())).is_err());
        assert!(ServerConfig::new(8080, None, Some("/custom".to_string())).is_err());
        assert!(ServerConfig::new(8080, None, Some("/swagger-ui".to_string())).is_err());
        assert!(ServerConfig::new(
            8080,
            Some(PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/no-such-dir"))),
            None,
        )
        .is_err());
    }
}
