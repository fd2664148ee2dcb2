use std::path::PathBuf;
use tempfile::TempDir;

/// Test utilities and common functions for CLI integration tests
///
/// Helper struct for managing test resources
pub struct TestContext {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with a temporary directory
    pub fn new() -> Result<Self, std::io::Error> {
        let temp_dir = TempDir::new()?;
        Ok(TestContext { temp_dir })
    }

    /// Get the path to the temporary directory
    pub fn temp_path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Create a temporary file with given content
    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf, std::io::Error> {
        let file_path = self.temp_path().join(name);
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Settings path inside the temporary directory
    pub fn settings_path(&self) -> PathBuf {
        self.temp_path().join("settings.toml")
    }

    /// Command bound to this context's settings file
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cmd();
        cmd.env("MAPPING_DEBUG_SETTINGS", self.settings_path());
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new().expect("Failed to create test context")
    }
}

/// Path of a fixture map file as a string argument
pub fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("maps")
        .join(format!("{}.map", name))
        .to_string_lossy()
        .into_owned()
}

/// Get the mapping-debug command with colors off and no user settings
#[allow(deprecated)]
pub fn cmd() -> assert_cmd::Command {
    let mut cmd =
        assert_cmd::Command::cargo_bin("mapping-debug").expect("Failed to find mapping-debug binary");
    cmd.env("NO_COLOR", "1")
        .env("MAPPING_DEBUG_SETTINGS", "/nonexistent/mapping-debug/settings.toml")
        .env_remove("RUST_LOG");
    cmd
}

/// Parse stdout of a finished command as JSON
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}
