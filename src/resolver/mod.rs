//! 构建元数据解析
//!
//! 将两个显式配置来源合并为一条 [`BuildInfo`]：
//!
//! | 字段           | 来源   | 默认键名        |
//! |----------------|--------|-----------------|
//! | `rqid`         | frozen | `RQID`          |
//! | `build_number` | frozen | `BUILD_NUMBER`  |
//! | `version`      | live   | `APP_VERSION`   |
//! | `environment`  | live   | `APP_ENV`       |
//!
//! 键存在且非空时原样采用，否则使用字段默认值。解析不会失败。

pub mod traits;

pub use traits::{ConfigSource, EnvSource, FrozenSource, MapSource};

use crate::model::{BuildField, BuildInfo, FieldOrigin};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 各字段对应的键名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataKeys {
    #[serde(default = "default_rqid_key")]
    pub rqid: String,
    #[serde(default = "default_build_number_key")]
    pub build_number: String,
    #[serde(default = "default_version_key")]
    pub version: String,
    #[serde(default = "default_environment_key")]
    pub environment: String,
}

fn default_rqid_key() -> String {
    FrozenSource::RQID_KEY.to_string()
}

fn default_build_number_key() -> String {
    FrozenSource::BUILD_NUMBER_KEY.to_string()
}

fn default_version_key() -> String {
    "APP_VERSION".to_string()
}

fn default_environment_key() -> String {
    "APP_ENV".to_string()
}

impl Default for MetadataKeys {
    fn default() -> Self {
        Self {
            rqid: default_rqid_key(),
            build_number: default_build_number_key(),
            version: default_version_key(),
            environment: default_environment_key(),
        }
    }
}

impl MetadataKeys {
    pub fn key_for(&self, field: BuildField) -> &str {
        match field {
            BuildField::Rqid => &self.rqid,
            BuildField::BuildNumber => &self.build_number,
            BuildField::Version => &self.version,
            BuildField::Environment => &self.environment,
        }
    }
}

/// 构建元数据解析器
#[derive(Clone)]
pub struct BuildInfoResolver {
    frozen: Arc<dyn ConfigSource>,
    live: Arc<dyn ConfigSource>,
    keys: MetadataKeys,
}

impl BuildInfoResolver {
    pub fn new(
        frozen: Arc<dyn ConfigSource>,
        live: Arc<dyn ConfigSource>,
        keys: MetadataKeys,
    ) -> Self {
        Self {
            frozen,
            live,
            keys,
        }
    }

    /// 生产用法：构建期常量 + 进程环境
    pub fn from_build_and_env(keys: MetadataKeys) -> Self {
        Self::new(Arc::new(FrozenSource), Arc::new(EnvSource), keys)
    }

    pub fn keys(&self) -> &MetadataKeys {
        &self.keys
    }

    /// 解析出一条新的 BuildInfo
    pub fn resolve(&self) -> BuildInfo {
        BuildInfo::new(
            self.resolve_field(BuildField::Rqid),
            self.resolve_field(BuildField::BuildNumber),
            self.resolve_field(BuildField::Version),
            self.resolve_field(BuildField::Environment),
        )
    }

    fn resolve_field(&self, field: BuildField) -> String {
        let source = self.source_for(field);
        let key = self.keys.key_for(field);

        match source.get(key).filter(|value| !value.is_empty()) {
            Some(value) => value,
            None => {
                tracing::trace!(
                    event = "build_info.field.default",
                    field = field.label(),
                    source = source.name(),
                    key = key
                );
                field.default_value().to_string()
            }
        }
    }

    fn source_for(&self, field: BuildField) -> &dyn ConfigSource {
        match field.origin() {
            FieldOrigin::Frozen => self.frozen.as_ref(),
            FieldOrigin::Live => self.live.as_ref(),
        }
    }
}

impl std::fmt::Debug for BuildInfoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildInfoResolver")
            .field("frozen", &self.frozen.name())
            .field("live", &self.live.name())
            .field("keys", &self.keys)
            .finish()
    }
}
