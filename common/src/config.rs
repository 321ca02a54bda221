/// Diagnostic server probed when an addition fails.
pub const DEFAULT_TEST_SERVER: &str = "conntest.tethr.dev";

/// Reference port proving the diagnostic server itself is reachable.
pub const DEFAULT_TEST_PORT: u16 = 443;

/// How to classify an error from the registration service.
///
/// The established flow folds service errors into the same outcome as
/// unparseable input, so "service down" and "typo in the address" read
/// identically to the user. The default keeps that behavior; opting
/// into `TreatAsGenericFailure` separates the two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServiceErrorPolicy {
    #[default]
    TreatAsInvalidInput,
    TreatAsGenericFailure,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Host probed for failure diagnosis and the standalone network test.
    pub test_server: String,
    /// Port that gates the probe; unreachable means inconclusive.
    pub test_port: u16,
    pub error_policy: ServiceErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_server: DEFAULT_TEST_SERVER.to_string(),
            test_port: DEFAULT_TEST_PORT,
            error_policy: ServiceErrorPolicy::default(),
        }
    }
}
