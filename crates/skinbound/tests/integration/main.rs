//! Integration tests for curve evaluation and skinned bounds

mod curves;
mod skinned_bounds;

/// Route library logs through the test harness; `RUST_LOG=trace` shows every step
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
