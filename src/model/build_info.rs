//! 构建元数据模型
//! BuildInfo 记录及字段表（默认值、显示标签、来源）

use serde::{Deserialize, Serialize};

/// 字段值来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrigin {
    /// 构建期固化到二进制中
    Frozen,
    /// 运行期从进程环境读取
    Live,
}

/// BuildInfo 的四个字段，枚举顺序即显示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildField {
    Rqid,
    BuildNumber,
    Version,
    Environment,
}

impl BuildField {
    pub const ALL: [BuildField; 4] = [
        BuildField::Rqid,
        BuildField::BuildNumber,
        BuildField::Version,
        BuildField::Environment,
    ];

    pub fn default_value(self) -> &'static str {
        match self {
            BuildField::Rqid => "local-dev",
            BuildField::BuildNumber => "0",
            BuildField::Version => "0.0.0",
            BuildField::Environment => "development",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BuildField::Rqid => "RQID",
            BuildField::BuildNumber => "Build",
            BuildField::Version => "Version",
            BuildField::Environment => "Environment",
        }
    }

    /// 显示前缀：Build 为 `#`，Version 为 `v`
    pub fn prefix(self) -> &'static str {
        match self {
            BuildField::BuildNumber => "#",
            BuildField::Version => "v",
            BuildField::Rqid | BuildField::Environment => "",
        }
    }

    pub fn origin(self) -> FieldOrigin {
        match self {
            BuildField::Rqid | BuildField::BuildNumber => FieldOrigin::Frozen,
            BuildField::Version | BuildField::Environment => FieldOrigin::Live,
        }
    }
}

/// 构建元数据记录（不可变，每次解析重新构造）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawBuildInfo")]
pub struct BuildInfo {
    rqid: String,
    build_number: String,
    version: String,
    environment: String,
}

impl BuildInfo {
    /// 由各字段值构造；空值替换为字段默认值，保证字段非空
    pub fn new(
        rqid: impl Into<String>,
        build_number: impl Into<String>,
        version: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        let or_default = |value: String, field: BuildField| {
            if value.is_empty() {
                field.default_value().to_string()
            } else {
                value
            }
        };

        Self {
            rqid: or_default(rqid.into(), BuildField::Rqid),
            build_number: or_default(build_number.into(), BuildField::BuildNumber),
            version: or_default(version.into(), BuildField::Version),
            environment: or_default(environment.into(), BuildField::Environment),
        }
    }

    pub fn rqid(&self) -> &str {
        &self.rqid
    }

    pub fn build_number(&self) -> &str {
        &self.build_number
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn get(&self, field: BuildField) -> &str {
        match field {
            BuildField::Rqid => &self.rqid,
            BuildField::BuildNumber => &self.build_number,
            BuildField::Version => &self.version,
            BuildField::Environment => &self.environment,
        }
    }

    /// 按显示顺序返回 (字段, 值)
    pub fn entries(&self) -> impl Iterator<Item = (BuildField, &str)> + '_ {
        BuildField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new("", "", "", "")
    }
}

/// 反序列化中间形态，经 `BuildInfo::new` 补齐默认值
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawBuildInfo {
    rqid: String,
    build_number: String,
    version: String,
    environment: String,
}

impl From<RawBuildInfo> for BuildInfo {
    fn from(raw: RawBuildInfo) -> Self {
        BuildInfo::new(raw.rqid, raw.build_number, raw.version, raw.environment)
    }
}

/// 构建来源信息（git 提交与构建时间），不参与四字段展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildProvenance {
    pub commit: String,
    pub built_at: String,
    pub package_version: String,
}

impl BuildProvenance {
    pub fn current() -> Self {
        Self {
            commit: crate::build_info::BUILD_COMMIT.to_string(),
            built_at: crate::build_info::BUILD_TIMESTAMP.to_string(),
            package_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_uses_documented_defaults() {
        let info = BuildInfo::default();
        assert_eq!(info.rqid(), "local-dev");
        assert_eq!(info.build_number(), "0");
        assert_eq!(info.version(), "0.0.0");
        assert_eq!(info.environment(), "development");
    }

    #[test]
    fn empty_values_are_replaced_individually() {
        let info = BuildInfo::new("abc123", "", "1.2.3", "");
        assert_eq!(info.rqid(), "abc123");
        assert_eq!(info.build_number(), "0");
        assert_eq!(info.version(), "1.2.3");
        assert_eq!(info.environment(), "development");
    }

    #[test]
    fn entries_follow_display_order() {
        let info = BuildInfo::new("r", "1", "2.0.0", "prod");
        let labels: Vec<&str> = info.entries().map(|(f, _)| f.label()).collect();
        assert_eq!(labels, ["RQID", "Build", "Version", "Environment"]);
    }

    #[test]
    fn field_origins_split_frozen_and_live() {
        assert_eq!(BuildField::Rqid.origin(), FieldOrigin::Frozen);
        assert_eq!(BuildField::BuildNumber.origin(), FieldOrigin::Frozen);
        assert_eq!(BuildField::Version.origin(), FieldOrigin::Live);
        assert_eq!(BuildField::Environment.origin(), FieldOrigin::Live);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let info = BuildInfo::new("abc123", "42", "1.2.3", "production");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["rqid"], "abc123");
        assert_eq!(json["buildNumber"], "42");
        assert_eq!(json["version"], "1.2.3");
        assert_eq!(json["environment"], "production");
    }

    #[test]
    fn deserializing_empty_fields_yields_defaults() {
        let json = r#"{"rqid":"","buildNumber":"","version":"1.2.3"}"#;
        let info: BuildInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info, BuildInfo::new("", "", "1.2.3", ""));
        assert_eq!(info.rqid(), "local-dev");
        assert_eq!(info.build_number(), "0");
        assert_eq!(info.environment(), "development");
    }
}
