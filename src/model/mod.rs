use serde::{Deserialize, Serialize};

pub mod build_info;

pub use build_info::{BuildField, BuildInfo, BuildProvenance, FieldOrigin};

/// GET /api/build-info 响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInfoResponse {
    pub success: bool,
    pub data: BuildInfo,
    pub provenance: BuildProvenance,
}

// 健康检查
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
