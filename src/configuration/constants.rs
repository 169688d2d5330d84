pub mod cargo_env {
    pub const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
}

pub mod common {
    pub const ENV_PREFIX: &str = "SQUISH_REPORT";
    pub const DEFAULT_MODULE_KEYWORDS: &[&str] = &["Login", "Recipe"];
    pub const DEFAULT_TEST_CASE_PATTERN: &str = r"(?i)^\s*test\s*case\s*\d+\b";
    pub const DEFAULT_OUTPUT: &str = "test_report";
}
