//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `clover <date> (<commit>)`, as printed by `--version`.
pub fn version_string() -> String {
    format!("clover {} ({})", BUILD_DATE, BUILD_COMMIT)
}
