use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

use crate::server_config::{ServerConfig, DEFAULT_MANAGEMENT_PATH};
use crate::static_assets::CustomAssetSource;
use crate::web_api::start_web_server;

mod management;
mod server_config;
mod static_assets;
mod view_forward;
mod web_api;

#[derive(Debug, Parser)]
struct Opt {
    #[clap(short, long, default_value = "8080")]
    port: u16,

    /// 自定义静态资源目录，不指定时使用打包进二进制的 static/custom
    #[clap(long)]
    custom_dir: Option<PathBuf>,

    /// 管理端点基础路径
    #[clap(long, default_value = DEFAULT_MANAGEMENT_PATH)]
    management_path: String,

    #[clap(long, default_value = "false")]
    disable_management: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let opt = Opt::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    let management_path = (!opt.disable_management).then_some(opt.management_path);
    let config = ServerConfig::new(opt.port, opt.custom_dir, management_path)
        .context("启动配置无效")?;

    match &config.custom_assets {
        CustomAssetSource::Bundled => info!("自定义资源: 内置 static/custom"),
        CustomAssetSource::Directory(dir) => info!("自定义资源目录: {}", dir.display()),
    }
    if config.management_path.is_none() {
        info!("管理端点已禁用");
    }

    start_web_server(config).await?;

    info!("服务已退出");
    Ok(())
}
