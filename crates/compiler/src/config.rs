//! Build configuration
//!
//! Output locations and external tool invocations, overridable through an
//! optional TOML file (`--config`). Every field defaults to the stock
//! behavior: write `bin/output.s`, assemble with `nasm -f elf64`, link with
//! `gcc -no-pie` into `bin/out.exe`.
//!
//! ```toml
//! [output]
//! dir = "build"
//! exe = "a.out"
//!
//! [tools]
//! linker = "cc"
//! linker-args = ["-no-pie", "-static"]
//! ```

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Set by `-o/--output`; wins over `[output]` when present.
    #[serde(skip)]
    pub exe_override: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory all outputs land in; created if absent.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_asm")]
    pub asm: String,
    #[serde(default = "default_object")]
    pub object: String,
    #[serde(default = "default_exe")]
    pub exe: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolsConfig {
    #[serde(default = "default_assembler")]
    pub assembler: String,
    #[serde(default = "default_assembler_args")]
    pub assembler_args: Vec<String>,
    #[serde(default = "default_linker")]
    pub linker: String,
    #[serde(default = "default_linker_args")]
    pub linker_args: Vec<String>,
}

fn default_dir() -> PathBuf {
    PathBuf::from("bin")
}

fn default_asm() -> String {
    "output.s".to_string()
}

fn default_object() -> String {
    "output.o".to_string()
}

fn default_exe() -> String {
    "out.exe".to_string()
}

fn default_assembler() -> String {
    "nasm".to_string()
}

fn default_assembler_args() -> Vec<String> {
    vec!["-f".to_string(), "elf64".to_string()]
}

fn default_linker() -> String {
    "gcc".to_string()
}

fn default_linker_args() -> Vec<String> {
    vec!["-no-pie".to_string()]
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: default_dir(),
            asm: default_asm(),
            object: default_object(),
            exe: default_exe(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            assembler: default_assembler(),
            assembler_args: default_assembler_args(),
            linker: default_linker(),
            linker_args: default_linker_args(),
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        BuildConfig::default()
    }

    /// Parse a configuration from TOML; missing fields keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse build config: {}", e))
    }

    /// Override the executable path (builder pattern, used by `-o`).
    pub fn with_exe_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.exe_override = Some(path.into());
        self
    }

    pub fn asm_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.asm)
    }

    pub fn object_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.object)
    }

    pub fn exe_path(&self) -> PathBuf {
        match &self.exe_override {
            Some(path) => path.clone(),
            None => self.output.dir.join(&self.output.exe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_match_stock_behavior() {
        let config = BuildConfig::default();
        assert_eq!(config.asm_path(), PathBuf::from("bin/output.s"));
        assert_eq!(config.object_path(), PathBuf::from("bin/output.o"));
        assert_eq!(config.exe_path(), PathBuf::from("bin/out.exe"));
        assert_eq!(config.tools.assembler, "nasm");
        assert_eq!(config.tools.assembler_args, vec!["-f", "elf64"]);
        assert_eq!(config.tools.linker, "gcc");
        assert_eq!(config.tools.linker_args, vec!["-no-pie"]);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = BuildConfig::from_toml("").unwrap();
        assert_eq!(config.exe_path(), PathBuf::from("bin/out.exe"));
        assert_eq!(config.tools.assembler, "nasm");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = BuildConfig::from_toml(
            r#"
            [output]
            dir = "build"
            exe = "a.out"
            "#,
        )
        .unwrap();
        assert_eq!(config.exe_path(), PathBuf::from("build/a.out"));
        // Untouched sections keep stock values.
        assert_eq!(config.asm_path(), PathBuf::from("build/output.s"));
        assert_eq!(config.tools.linker, "gcc");
    }

    #[test]
    fn test_tool_overrides() {
        let config = BuildConfig::from_toml(
            r#"
            [tools]
            linker = "cc"
            linker-args = ["-no-pie", "-static"]
            "#,
        )
        .unwrap();
        assert_eq!(config.tools.linker, "cc");
        assert_eq!(config.tools.linker_args, vec!["-no-pie", "-static"]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = BuildConfig::from_toml("[output]\ntypo = true\n").unwrap_err();
        assert!(err.contains("Failed to parse build config"), "got: {}", err);
    }

    #[test]
    fn test_exe_override_wins() {
        let config = BuildConfig::default().with_exe_override("custom/path");
        assert_eq!(config.exe_path(), PathBuf::from("custom/path"));
        // The other outputs stay in the configured directory.
        assert_eq!(config.asm_path(), PathBuf::from("bin/output.s"));
    }
}
