pub mod api;
#[cfg(test)]
mod build_env;
pub mod build_info;
pub mod export;
pub mod model;
pub mod render;
pub mod resolver;
pub mod server;
pub mod util;

use resolver::BuildInfoResolver;
use util::config::Config;

/// 应用状态结构（只读，按请求克隆）
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub resolver: BuildInfoResolver,
}

impl AppState {
    pub fn new(config: Config, resolver: BuildInfoResolver) -> Self {
        Self { config, resolver }
    }
}
