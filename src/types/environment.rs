//! Gateway environment selection

use super::constants::{PRODUCTION_BASE_URL, TEST_BASE_URL};

/// Which SantimPay deployment requests go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Test,
}

impl Environment {
    /// Pick the environment from the test-mode flag
    pub fn from_test_mode(test_mode: bool) -> Self {
        if test_mode {
            Environment::Test
        } else {
            Environment::Production
        }
    }

    /// Get the gateway base URL for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Test => TEST_BASE_URL,
        }
    }

    /// Get the mode label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "PRODUCTION",
            Environment::Test => "TEST",
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Environment::Test)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
