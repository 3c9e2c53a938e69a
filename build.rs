//! Stamps the binary with the git commit and build date shown by `--version`.
//!
//! Both can be pinned from the environment (`BRINEBOT_COMMIT`,
//! `BRINEBOT_BUILD_DATE`), which release builds outside a checkout rely on.

use std::env;
use std::process::Command;

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (hash.len() == 7).then_some(hash)
}

fn main() {
    let commit = env::var("BRINEBOT_COMMIT")
        .ok()
        .or_else(git_commit)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("BRINEBOT_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    println!("cargo:rustc-env=BRINEBOT_COMMIT={commit}");
    println!("cargo:rustc-env=BRINEBOT_BUILD_DATE={date}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BRINEBOT_COMMIT");
    println!("cargo:rerun-if-env-changed=BRINEBOT_BUILD_DATE");
}
