use std::collections::HashMap;

use crate::build_info;

/// 键值配置来源
pub trait ConfigSource: Send + Sync {
    /// 读取键值；未设置时返回 None
    fn get(&self, key: &str) -> Option<String>;

    /// 来源名称，仅用于日志
    fn name(&self) -> &'static str;
}

/// 进程环境变量
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn name(&self) -> &'static str {
        "env"
    }
}

/// 内存键值表
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn name(&self) -> &'static str {
        "map"
    }
}

/// 构建期固化的值（RQID / BUILD_NUMBER），与运行期环境无关
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenSource;

impl FrozenSource {
    pub const RQID_KEY: &'static str = "RQID";
    pub const BUILD_NUMBER_KEY: &'static str = "BUILD_NUMBER";
}

impl ConfigSource for FrozenSource {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            Self::RQID_KEY => Some(build_info::FROZEN_RQID.to_string()),
            Self::BUILD_NUMBER_KEY => Some(build_info::FROZEN_BUILD_NUMBER.to_string()),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        "frozen"
    }
}
