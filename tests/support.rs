// tests/support.rs
//! Shared test fixtures and tracing setup

/// 40-character key string; providers derive the first 32 bytes.
#[allow(dead_code)] // each integration target compiles its own copy
pub const KEY: &str = "5a46d6975d51764f10eda8fe266aa599352cd6ae";

/// Same length as [`KEY`], different material.
#[allow(dead_code)]
pub const WRONG_KEY: &str = "ae65fb42c9b261e10729f94443e595fc91fdc10a";

#[allow(dead_code)]
pub const PLAINTEXT: &str = "stringToEncrypt";

#[allow(dead_code)]
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}
