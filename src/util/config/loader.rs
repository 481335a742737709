//! 配置加载和管理模块
//! 处理配置文件的读取、写入和环境变量覆盖

use super::types::*;
use crate::resolver::{ConfigSource, EnvSource};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从YAML文件读取配置
    pub fn read_yaml(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = serde_yaml::from_str(&config_str)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }

    /// 从进程环境变量读取配置覆盖
    pub fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides_from(config, &EnvSource)
    }

    /// 从任意键值来源应用覆盖（空值忽略）
    pub fn apply_overrides_from(mut config: Config, source: &dyn ConfigSource) -> Config {
        let read = |key: &str| source.get(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = read("BUILDINFO_HOST") {
            tracing::info!(event = "config.override", key = "BUILDINFO_HOST", value = %host);
            config.server.host = host;
        }

        if let Some(port_str) = read("BUILDINFO_PORT") {
            match port_str.trim().parse::<u16>() {
                Ok(port) => {
                    tracing::info!(event = "config.override", key = "BUILDINFO_PORT", value = port);
                    config.server.port = port;
                }
                Err(_) => {
                    tracing::warn!("[warn] BUILDINFO_PORT 无法解析为端口号: {}", port_str);
                }
            }
        }

        if let Some(level) = read("BUILDINFO_LOG_LEVEL") {
            tracing::info!(event = "config.override", key = "BUILDINFO_LOG_LEVEL", value = %level);
            config.logging.level = level.trim().to_ascii_lowercase();
        }

        if let Some(flag) = read("BUILDINFO_LOG_JSON") {
            match Self::parse_bool(&flag) {
                Ok(enabled) => config.logging.structured = Some(enabled),
                Err(_) => tracing::warn!("[warn] BUILDINFO_LOG_JSON 无法解析为布尔值: {}", flag),
            }
        }

        if let Some(output_dir) = read("BUILDINFO_OUTPUT_DIR") {
            tracing::info!(event = "config.override", key = "BUILDINFO_OUTPUT_DIR", value = %output_dir);
            config.export.output_dir = output_dir;
        }

        config
    }

    /// 读取配置文件并应用环境变量覆盖
    pub fn load_with_env_overrides(path: impl AsRef<Path>) -> Result<Config> {
        let base_config = Self::read_yaml(path)?;
        Ok(Self::apply_env_overrides(base_config))
    }

    fn parse_bool(value: &str) -> Result<bool, ()> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" => Ok(false),
            _ => Err(()),
        }
    }
}

/// 配置写入器
pub struct ConfigWriter;

impl ConfigWriter {
    /// 写入配置到指定路径，确保目录存在
    pub fn write_yaml_with_dir(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml_content = serde_yaml::to_string(config)?;
        fs::write(path, yaml_content)
            .with_context(|| format!("写入配置文件失败: {}", path.display()))?;
        Ok(())
    }

    /// 生成配置模板
    pub fn generate_template() -> Config {
        Config {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            metadata: Default::default(),
            export: ExportConfig::default(),
            api: ApiConfig::default(),
        }
    }
}
