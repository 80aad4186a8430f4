/// Initialises `env_logger` for tests, output is captured by the test harness.
pub fn test_logger() {
    // Tests run in parallel, so only the first initialisation succeeds.
    let _ = env_logger::builder().is_test(true).try_init();
}
