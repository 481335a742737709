//! 服务器模块
//!
//! - 配置管理 (config.rs)
//! - HTTP服务器设置 (http.rs)
//!
//! 使用示例：
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use buildinfo_page::server::ServerBootstrap;
//!
//! let server = ServerBootstrap::new()?;
//! server.start().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;

pub use config::ConfigManager;
pub use http::{HttpServer, ServerManager};

use crate::build_info;
use crate::export::{ExportReport, StaticExporter};
use crate::render::BuildInfoDisplay;
use crate::resolver::BuildInfoResolver;
use crate::util::config::{Config, ValidationReport};
use crate::util::log::ConsoleTarget;
use crate::AppState;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// 服务器引导程序 - 统一的启动入口
pub struct ServerBootstrap {
    config: Config,
    resolver: BuildInfoResolver,
    _log_guard: Option<WorkerGuard>,
}

impl ServerBootstrap {
    /// 加载配置、初始化日志并构造解析器
    pub fn new() -> Result<Self> {
        let (config, validation_report) = ConfigManager::load_and_validate()?;
        let log_guard = ConfigManager::initialize_logging(&config, ConsoleTarget::Stdout)?;
        Self::finish(config, &validation_report, log_guard)
    }

    /// 命令行用法（export / print）：不生成配置模板，控制台日志写入 stderr
    pub fn for_cli() -> Result<Self> {
        let (config, validation_report) = ConfigManager::load_read_only()?;
        let log_guard = ConfigManager::initialize_logging(&config, ConsoleTarget::Stderr)?;
        Self::finish(config, &validation_report, log_guard)
    }

    /// 由已有配置与解析器构造，不初始化日志
    pub fn from_parts(config: Config, resolver: BuildInfoResolver) -> Self {
        Self {
            config,
            resolver,
            _log_guard: None,
        }
    }

    fn finish(
        config: Config,
        validation_report: &ValidationReport,
        log_guard: Option<WorkerGuard>,
    ) -> Result<Self> {
        Self::check_validation(validation_report)?;

        let resolver = BuildInfoResolver::from_build_and_env(config.metadata.clone());
        info!(event = "bootstrap.ready", resolver = ?resolver);

        Ok(Self {
            config,
            resolver,
            _log_guard: log_guard,
        })
    }

    fn check_validation(report: &ValidationReport) -> Result<()> {
        ConfigManager::log_validation_report(report);
        if report.has_errors() {
            return Err(anyhow::anyhow!(
                "配置验证失败: {} 个错误",
                report.error_count()
            ));
        }
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 启动HTTP服务
    pub async fn start(self) -> Result<()> {
        info!("=== 构建信息服务启动 ===");
        info!("版本信息: {}", build_info::summary());
        info!("服务端口: {}", self.config.get_port());

        let app_state = AppState::new(self.config.clone(), self.resolver.clone());
        let server = ServerManager::create_server(&self.config, app_state).await?;
        ServerManager::start_server(server).await
    }

    /// 导出静态页面；未指定目录时使用配置中的 export.output_dir
    pub fn export(&self, output_dir: Option<PathBuf>) -> Result<ExportReport> {
        let output_dir =
            output_dir.unwrap_or_else(|| PathBuf::from(&self.config.export.output_dir));
        StaticExporter::export(&self.resolver.resolve(), output_dir)
    }

    /// 纯文本形式的构建信息
    pub fn describe(&self) -> String {
        BuildInfoDisplay::new(&self.resolver.resolve()).to_text()
    }
}

pub async fn start_server() -> Result<()> {
    ServerBootstrap::new()?.start().await
}
