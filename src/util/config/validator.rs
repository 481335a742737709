//! 配置验证模块

use super::types::*;
use crate::resolver::FrozenSource;

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 全面验证配置
    pub fn validate_all(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_server_config(&config.server, &mut report);
        Self::validate_logging_config(&config.logging, &mut report);
        Self::validate_metadata_keys(config, &mut report);
        Self::validate_export_config(&config.export, &mut report);
        Self::validate_api_config(&config.api, &mut report);

        report
    }

    fn validate_server_config(config: &ServerConfig, report: &mut ValidationReport) {
        if config.port == 0 {
            report.add_error("server.port", "端口不能为0");
        } else if config.port < 1024 {
            report.add_warning("server.port", "使用了特权端口，可能需要管理员权限");
        }

        if config.host.trim().is_empty() {
            report.add_error("server.host", "监听地址不能为空");
        }
    }

    fn validate_logging_config(config: &LoggingConfig, report: &mut ValidationReport) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level = config.level.trim().to_ascii_lowercase();
        if !valid_levels.contains(&level.as_str()) {
            report.add_error("logging.level", &format!("无效的日志级别: {}", config.level));
        }

        if config.file.enabled {
            if config.file.directory.trim().is_empty() {
                report.add_error("logging.file.directory", "日志目录不能为空");
            }
            if config.file.retention_days == Some(0) {
                report.add_warning("logging.file.retention_days", "日志保留天数为0，日志将不会被清理");
            }
        }
    }

    fn validate_metadata_keys(config: &Config, report: &mut ValidationReport) {
        let keys = &config.metadata;

        for (field, key) in [
            ("metadata.rqid", &keys.rqid),
            ("metadata.build_number", &keys.build_number),
            ("metadata.version", &keys.version),
            ("metadata.environment", &keys.environment),
        ] {
            if key.trim().is_empty() {
                report.add_error(field, "键名不能为空");
            }
        }

        if keys.version == keys.environment {
            report.add_error(
                "metadata.environment",
                &format!("version 与 environment 使用了相同的键名: {}", keys.version),
            );
        }

        // 构建期只固化 RQID / BUILD_NUMBER
        if keys.rqid != FrozenSource::RQID_KEY {
            report.add_warning(
                "metadata.rqid",
                &format!("构建期仅固化 {}，{} 将始终取默认值", FrozenSource::RQID_KEY, keys.rqid),
            );
        }
        if keys.build_number != FrozenSource::BUILD_NUMBER_KEY {
            report.add_warning(
                "metadata.build_number",
                &format!(
                    "构建期仅固化 {}，{} 将始终取默认值",
                    FrozenSource::BUILD_NUMBER_KEY,
                    keys.build_number
                ),
            );
        }
    }

    fn validate_export_config(config: &ExportConfig, report: &mut ValidationReport) {
        if config.output_dir.trim().is_empty() {
            report.add_error("export.output_dir", "导出目录不能为空");
        }
    }

    fn validate_api_config(config: &ApiConfig, report: &mut ValidationReport) {
        if config.request_timeout_secs == 0 {
            report.add_error("api.request_timeout_secs", "请求超时必须大于0");
        }
        if config.cors_allow_any {
            report.add_info("api.cors_allow_any", "已允许任意来源访问 /api");
        }
    }
}

/// 验证报告
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub info: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue::new(field, message));
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue::new(field, message));
    }

    pub fn add_info(&mut self, field: &str, message: &str) {
        self.info.push(ValidationIssue::new(field, message));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

/// 验证问题
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
