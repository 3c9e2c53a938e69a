//! Version details stamped in by `build.rs`.

/// Short git hash of the build, or `unknown` outside a checkout.
pub const BUILD_COMMIT: &str = env!("BRINEBOT_COMMIT");
/// `YYYY-MM-DD` of the build.
pub const BUILD_DATE: &str = env!("BRINEBOT_BUILD_DATE");

/// `brinebot <version> (<date>, <commit>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!(
        "brinebot {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
