//! Assembly emission and external tool driving
//!
//! The compiler's responsibility ends at a validly-formatted assembly file;
//! `nasm` and the linker driver are opaque subprocesses run synchronously
//! with inherited stdio. Non-zero exits and missing tools surface as fatal
//! errors.

use crate::config::BuildConfig;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

/// Minimum nasm major version required. `-f elf64` has been stable since
/// the 2.x series.
const MIN_NASM_VERSION: u32 = 2;

/// Cache for the nasm version check result.
/// Stores Ok(version) on success or Err(message) on failure.
static NASM_VERSION_CHECKED: OnceLock<Result<u32, String>> = OnceLock::new();

/// Write the fully-materialized assembly text to disk, creating the output
/// directory if needed.
pub fn write_assembly(asm: &str, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| {
            format!(
                "Failed to create output directory '{}': {}",
                parent.display(),
                e
            )
        })?;
    }
    fs::write(path, asm)
        .map_err(|e| format!("Failed to write assembly file '{}': {}", path.display(), e))
}

/// Check that the configured assembler is available and recent enough.
/// Returns Ok(version) on success, Err with a helpful message on failure.
/// The check is cached; it only runs once per process.
pub fn check_nasm_version(assembler: &str) -> Result<u32, String> {
    NASM_VERSION_CHECKED
        .get_or_init(|| {
            let output = Command::new(assembler).arg("-v").output().map_err(|e| {
                format!(
                    "Failed to run {}: {}. \
                     Make sure it is installed and on your PATH.",
                    assembler, e
                )
            })?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(format!(
                    "{} -v failed with exit code {:?}: {}",
                    assembler,
                    output.status.code(),
                    stderr
                ));
            }

            let version_str = String::from_utf8_lossy(&output.stdout);
            let version = parse_nasm_version(&version_str).ok_or_else(|| {
                format!(
                    "Could not parse nasm version from: {}",
                    version_str.lines().next().unwrap_or(&version_str)
                )
            })?;

            if version < MIN_NASM_VERSION {
                return Err(format!(
                    "nasm version {} detected, but version {} or later is required \
                     for elf64 output.",
                    version, MIN_NASM_VERSION
                ));
            }

            Ok(version)
        })
        .clone()
}

/// Parse the major version number from `nasm -v` output.
///
/// Handles the usual forms, e.g. "NASM version 2.16.01 compiled on ..." and
/// "NASM version 2.15.05".
fn parse_nasm_version(output: &str) -> Option<u32> {
    for line in output.lines() {
        if let Some(idx) = line.find("version ") {
            let after_version = &line[idx + 8..];
            let major: String = after_version
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if !major.is_empty() {
                return major.parse().ok();
            }
        }
    }
    None
}

/// Assemble the written file and link the result into an executable.
///
/// Both tools inherit stdio, so their own diagnostics reach the user
/// directly; this function only reports invocation and exit failures.
pub fn assemble_and_link(config: &BuildConfig) -> Result<(), String> {
    let asm_path = config.asm_path();
    let object_path = config.object_path();
    let exe_path = config.exe_path();

    run_tool(
        Command::new(&config.tools.assembler)
            .args(&config.tools.assembler_args)
            .arg(&asm_path),
        &config.tools.assembler,
    )?;

    run_tool(
        Command::new(&config.tools.linker)
            .args(&config.tools.linker_args)
            .arg(&object_path)
            .arg("-o")
            .arg(&exe_path),
        &config.tools.linker,
    )?;

    Ok(())
}

fn run_tool(command: &mut Command, name: &str) -> Result<(), String> {
    let status = command.status().map_err(|e| {
        format!(
            "Failed to run {}: {}. \
             Make sure it is installed and on your PATH.",
            name, e
        )
    })?;
    if !status.success() {
        return Err(format!(
            "{} failed with exit code {}",
            name,
            status.code().map_or_else(|| "?".to_string(), |c| c.to_string())
        ));
    }
    Ok(())
}
