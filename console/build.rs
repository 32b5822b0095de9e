//! Build script for msconsole
//! Stamps the binary with git and build metadata for `msconsole version`

use chrono::Utc;
use std::process::Command;

fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=MSCONSOLE_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=MSCONSOLE_BUILD_TIME={}", build_time);
    println!("cargo:rustc-env=MSCONSOLE_BUILD_PROFILE={}", profile);

    println!("cargo:rerun-if-changed=.git/HEAD");
}
