#![allow(dead_code)]

pub mod memory_backend;
pub mod show_output;

/// テスト中のログを出す (二重初期化は無視)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
