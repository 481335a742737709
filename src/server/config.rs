//! 配置管理模块
//! 负责配置文件的查找、加载、验证以及日志初始化

use crate::util::config::{Config, ConfigLoader, ConfigValidator, ValidationReport};
use crate::util::log::{cleanup_old_logs, log_init_with_config, ConsoleTarget};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 加载和验证配置
    pub fn load_and_validate() -> Result<(Config, ValidationReport)> {
        let config_path = Self::find_config_file_path(CONFIG_FILE_NAME);
        Self::load_and_validate_from(&config_path)
    }

    pub fn load_and_validate_from(config_path: &Path) -> Result<(Config, ValidationReport)> {
        let config = match ConfigLoader::load_with_env_overrides(config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("[warn] 配置文件读取失败: {} - {:#}", config_path.display(), e);
                Self::handle_config_load_failure(config_path)?
            }
        };

        let report = ConfigValidator::validate_all(&config);
        Ok((config, report))
    }

    /// 只读加载：配置文件不存在时使用默认值，不生成模板
    pub fn load_read_only() -> Result<(Config, ValidationReport)> {
        let config_path = Self::find_config_file_path(CONFIG_FILE_NAME);
        Self::load_read_only_from(&config_path)
    }

    pub fn load_read_only_from(config_path: &Path) -> Result<(Config, ValidationReport)> {
        let config = if config_path.exists() {
            ConfigLoader::load_with_env_overrides(config_path)?
        } else {
            ConfigLoader::apply_env_overrides(Config::default())
        };

        let report = ConfigValidator::validate_all(&config);
        Ok((config, report))
    }

    /// 初始化日志系统，并按保留天数清理旧日志
    pub fn initialize_logging(
        config: &Config,
        console: ConsoleTarget,
    ) -> Result<Option<WorkerGuard>> {
        let log_guard = log_init_with_config(&config.logging, console)?;

        if config.logging.file.enabled {
            if let Some(retention_days) = config.logging.file.retention_days.filter(|d| *d > 0) {
                let log_path = Path::new(&config.logging.file.directory);
                if let Err(e) = cleanup_old_logs(log_path, retention_days) {
                    warn!("日志清理失败: {}", e);
                }
            }
        }

        Ok(log_guard)
    }

    /// 输出验证报告
    pub fn log_validation_report(report: &ValidationReport) {
        for error in &report.errors {
            error!(event = "config.validation.error", field = %error.field, message = %error.message);
        }
        for warning in &report.warnings {
            warn!(event = "config.validation.warning", field = %warning.field, message = %warning.message);
        }
        for item in &report.info {
            info!(event = "config.validation.info", field = %item.field, message = %item.message);
        }
    }

    /// 查找配置文件：./config/ → ../config/ → ./
    pub fn find_config_file_path(filename: &str) -> PathBuf {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let config_in_current = current_dir.join("config").join(filename);
        if config_in_current.exists() {
            return config_in_current;
        }

        // 在 bin/ 目录运行时使用上级目录的 config/
        if let Some(parent) = current_dir.parent() {
            let config_in_parent = parent.join("config").join(filename);
            if config_in_parent.exists() {
                return config_in_parent;
            }
        }

        current_dir.join(filename)
    }

    /// 配置文件不存在时生成模板并使用默认值；存在但无法解析则报错
    fn handle_config_load_failure(config_path: &Path) -> Result<Config> {
        if !config_path.exists() {
            let config = ConfigLoader::apply_env_overrides(Config::default());
            if let Err(write_err) = Config::default().write_yaml_to_path(config_path) {
                warn!("[fail] 创建默认配置文件失败: {}", write_err);
            }
            Ok(config)
        } else {
            Err(anyhow::anyhow!(
                "配置文件解析失败: {}",
                config_path.display()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let (config, report) = ConfigManager::load_and_validate_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.export.output_dir, Config::default().export.output_dir);
        assert_eq!(config.metadata, Config::default().metadata);
        assert!(report.is_valid());
    }

    #[test]
    fn read_only_load_never_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let (config, report) = ConfigManager::load_read_only_from(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(config.metadata, Config::default().metadata);
        assert!(report.is_valid());
    }

    #[test]
    fn read_only_load_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "export:\n  output_dir: public\n").unwrap();

        let (config, _) = ConfigManager::load_read_only_from(&path).unwrap();
        assert_eq!(config.export.output_dir, "public");
    }

    #[test]
    fn validation_errors_log_at_error_level() {
        use std::sync::{Arc, Mutex};
        use tracing::{Event, Level, Subscriber};
        use tracing_subscriber::layer::{Context, SubscriberExt};
        use tracing_subscriber::{Layer, Registry};

        #[derive(Clone, Default)]
        struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

        impl<S: Subscriber> Layer<S> for LevelRecorder {
            fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
                self.0.lock().unwrap().push(*event.metadata().level());
            }
        }

        let mut report = ValidationReport::new();
        report.add_error("server.port", "端口不能为0");
        report.add_warning("server.port", "使用了特权端口");

        let recorder = LevelRecorder::default();
        let subscriber = Registry::default().with(recorder.clone());
        tracing::subscriber::with_default(subscriber, || {
            ConfigManager::log_validation_report(&report);
        });

        let levels = recorder.0.lock().unwrap().clone();
        assert_eq!(levels, vec![Level::ERROR, Level::WARN]);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "server: [not, a, map").unwrap();

        assert!(ConfigManager::load_and_validate_from(&path).is_err());
    }

    #[test]
    fn validation_errors_are_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "api:\n  request_timeout_secs: 0\n").unwrap();

        let (_, report) = ConfigManager::load_and_validate_from(&path).unwrap();
        assert!(report.has_errors());
    }
}
