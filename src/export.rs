//! 静态导出：把渲染后的页面写入固定输出目录
//!
//! 导出产物自包含，RQID / BUILD_NUMBER 已在构建期固化。

use crate::model::{BuildInfo, BuildInfoResponse, BuildProvenance};
use crate::render::PageShell;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";
pub const BUILD_INFO_FILE: &str = "build-info.json";

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

pub struct StaticExporter;

impl StaticExporter {
    pub fn export(info: &BuildInfo, output_dir: impl AsRef<Path>) -> Result<ExportReport> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)
            .with_context(|| format!("创建导出目录失败: {}", output_dir.display()))?;

        let index_path = output_dir.join(INDEX_FILE);
        fs::write(&index_path, PageShell::render(info))
            .with_context(|| format!("写入页面失败: {}", index_path.display()))?;

        let payload = BuildInfoResponse {
            success: true,
            data: info.clone(),
            provenance: BuildProvenance::current(),
        };
        let json_path = output_dir.join(BUILD_INFO_FILE);
        fs::write(&json_path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("写入构建信息失败: {}", json_path.display()))?;

        tracing::info!(
            event = "export.complete",
            output_dir = %output_dir.display(),
            rqid = info.rqid(),
            build_number = info.build_number()
        );

        Ok(ExportReport {
            output_dir: output_dir.to_path_buf(),
            files: vec![index_path, json_path],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_page_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist");
        let info = BuildInfo::new("abc123", "42", "1.2.3", "production");

        let report = StaticExporter::export(&info, &out).unwrap();
        assert_eq!(report.files.len(), 2);

        let html = fs::read_to_string(out.join(INDEX_FILE)).unwrap();
        assert!(html.contains("<strong>Build:</strong> #42"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(BUILD_INFO_FILE)).unwrap()).unwrap();
        assert_eq!(json["data"]["rqid"], "abc123");
        assert_eq!(json["data"]["version"], "1.2.3");
    }

    #[test]
    fn export_overwrites_previous_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        StaticExporter::export(&BuildInfo::new("old", "1", "", ""), dir.path()).unwrap();
        StaticExporter::export(&BuildInfo::new("new", "2", "", ""), dir.path()).unwrap();

        let html = fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        assert!(html.contains("<strong>RQID:</strong> new"));
        assert!(!html.contains("<strong>RQID:</strong> old"));
    }
}
