use chrono::Utc;
use std::{env, process::Command};

#[path = "src/build_env.rs"]
mod build_env;

use build_env::{freeze_value, FrozenValue};

const DEFAULT_RQID: &str = "local-dev";
const DEFAULT_BUILD_NUMBER: &str = "0";

fn main() {
    println!("cargo:rerun-if-env-changed=RQID");
    println!("cargo:rerun-if-env-changed=BUILD_NUMBER");
    println!("cargo:rerun-if-changed=src/build_env.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");

    freeze_build_identity();
    set_build_provenance();
}

// RQID 与 BUILD_NUMBER 在编译期固化，运行期环境变量不再生效
fn freeze_build_identity() {
    let rqid = env_or_default("RQID", DEFAULT_RQID);
    let build_number = env_or_default("BUILD_NUMBER", DEFAULT_BUILD_NUMBER);

    println!("cargo:rustc-env=APP_FROZEN_RQID={}", rqid);
    println!("cargo:rustc-env=APP_FROZEN_BUILD_NUMBER={}", build_number);
}

fn set_build_provenance() {
    let git_commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let build_timestamp = Utc::now().to_rfc3339();

    println!("cargo:rustc-env=APP_BUILD_COMMIT={}", git_commit);
    println!("cargo:rustc-env=APP_BUILD_TIMESTAMP={}", build_timestamp);
}

fn env_or_default(key: &str, default: &str) -> String {
    let frozen = freeze_value(env::var(key).ok(), default);
    if let FrozenValue::Multiline(_) = frozen {
        // rustc-env 指令无法携带换行
        println!("cargo:warning={} 包含换行符，使用默认值 {}", key, default);
    }
    frozen.into_value()
}
