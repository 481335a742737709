use crate::util::config::LoggingConfig;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::fmt::format::Format;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::EnvFilter, Layer, Registry};

pub const LOG_FILE_PREFIX: &str = "buildinfo-page";

/// 控制台日志输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    /// 命令行输出占用 stdout 时使用
    Stderr,
}

impl ConsoleTarget {
    fn make_writer(self) -> BoxMakeWriter {
        match self {
            ConsoleTarget::Stdout => BoxMakeWriter::new(io::stdout),
            ConsoleTarget::Stderr => BoxMakeWriter::new(io::stderr),
        }
    }

    fn is_terminal(self) -> bool {
        match self {
            ConsoleTarget::Stdout => io::stdout().is_terminal(),
            ConsoleTarget::Stderr => io::stderr().is_terminal(),
        }
    }
}

/// 按配置初始化日志：控制台 + 可选的按天滚动文件
///
/// 返回文件写入线程的 guard，需要在进程存活期间持有。
pub fn log_init_with_config(
    config: &LoggingConfig,
    console: ConsoleTarget,
) -> anyhow::Result<Option<WorkerGuard>> {
    let level_filter = parse_level(&config.level);
    let filter_expression = build_env_filter_expression(level_filter);
    let make_filter = || {
        EnvFilter::try_new(filter_expression.as_str())
            .unwrap_or_else(|_| EnvFilter::new(level_filter_to_str(level_filter)))
    };
    let use_json = config.structured.unwrap_or(false);

    let (file_writer, guard, log_dir) = if config.file.enabled {
        let log_dir = resolve_log_dir(&config.file.directory);
        std::fs::create_dir_all(&log_dir)?;
        let file_appender = daily(&log_dir, format!("{}.log", LOG_FILE_PREFIX));
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        (Some(writer), Some(guard), Some(log_dir))
    } else {
        (None, None, None)
    };

    if use_json {
        let console_layer = layer()
            .json()
            .with_target(false)
            .with_ansi(false)
            .with_writer(console.make_writer())
            .with_filter(make_filter());

        let file_layer = file_writer.map(|writer| {
            layer()
                .json()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(make_filter())
        });

        Registry::default()
            .with(console_layer)
            .with(file_layer)
            .try_init()?;
    } else {
        let console_format = Format::default()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false);

        let file_format = Format::default()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false);

        let console_layer = layer()
            .event_format(console_format)
            .with_ansi(console.is_terminal())
            .with_writer(console.make_writer())
            .with_filter(make_filter());

        let file_layer = file_writer.map(|writer| {
            layer()
                .event_format(file_format)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(make_filter())
        });

        Registry::default()
            .with(console_layer)
            .with(file_layer)
            .try_init()?;
    }

    tracing::info!(
        event = "log.init",
        level = %config.level,
        console = ?console,
        file = config.file.enabled,
        directory = ?log_dir,
        rotation = "daily",
        structured = use_json
    );

    Ok(guard)
}

/// 相对路径基于当前目录；在 bin/ 下运行时使用上级目录
fn resolve_log_dir(directory: &str) -> PathBuf {
    let path = Path::new(directory);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if current_dir.file_name() == Some(std::ffi::OsStr::new("bin")) {
        if let Some(parent) = current_dir.parent() {
            return parent.join(path);
        }
    }
    current_dir.join(path)
}

/// 删除超过保留天数的日志文件，返回删除数量
pub fn cleanup_old_logs(log_dir: &Path, retention_days: u32) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        tracing::debug!("日志目录不存在: {}", log_dir.display());
        return Ok(0);
    }

    let retention = std::time::Duration::from_secs(retention_days as u64 * 24 * 60 * 60);
    let cutoff = std::time::SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(std::time::UNIX_EPOCH);

    let mut deleted_count = 0;
    let mut error_count = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("");

        // 只处理本服务的日志文件
        if !file_name.starts_with(LOG_FILE_PREFIX) {
            continue;
        }

        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata
            .modified()
            .unwrap_or_else(|_| std::time::SystemTime::now());
        if modified < cutoff {
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    deleted_count += 1;
                    tracing::debug!("已删除过期日志: {}", path.display());
                }
                Err(e) => {
                    error_count += 1;
                    tracing::warn!("删除日志文件失败: {} - {}", path.display(), e);
                }
            }
        }
    }

    if deleted_count > 0 {
        tracing::info!(event = "log.cleanup", deleted = deleted_count, retention_days);
    }
    if error_count > 0 {
        tracing::warn!("有 {} 个文件清理失败", error_count);
    }

    Ok(deleted_count)
}

fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// RUST_LOG 中的指令追加在配置级别之后
fn build_env_filter_expression(default_level: LevelFilter) -> String {
    let mut directives = vec![level_filter_to_str(default_level).to_string()];

    if let Ok(extra) = std::env::var("RUST_LOG") {
        directives.extend(
            extra
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        );
    }

    directives.join(",")
}

fn level_filter_to_str(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::OFF => "off",
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("WARN"), LevelFilter::WARN);
        assert_eq!(parse_level("loud"), LevelFilter::INFO);
    }

    #[test]
    fn cleanup_only_touches_own_log_files() {
        let dir = tempfile::tempdir().unwrap();
        let own = dir.path().join(format!("{}.log.2020-01-01", LOG_FILE_PREFIX));
        let foreign = dir.path().join("other.log");
        std::fs::write(&own, "x").unwrap();
        std::fs::write(&foreign, "y").unwrap();

        // 保留 0 天：所有本服务日志均视为过期
        std::thread::sleep(std::time::Duration::from_millis(20));
        let deleted = cleanup_old_logs(dir.path(), 0).unwrap();

        assert_eq!(deleted, 1);
        assert!(!own.exists());
        assert!(foreign.exists());
    }

    #[test]
    fn cleanup_keeps_recent_files() {
        let dir = tempfile::tempdir().unwrap();
        let own = dir.path().join(format!("{}.log", LOG_FILE_PREFIX));
        std::fs::write(&own, "x").unwrap();

        assert_eq!(cleanup_old_logs(dir.path(), 7).unwrap(), 0);
        assert!(own.exists());
    }

    #[test]
    fn cleanup_missing_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(&dir.path().join("nope"), 1).unwrap(), 0);
    }
}
