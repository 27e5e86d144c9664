use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Command for the CLI with catalog-related environment cleared.
pub fn explorer() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dino-explorer"));
    cmd.env_remove("DINO_EXPLORER_CATALOG")
        .env_remove("DINO_EXPLORER_ASSETS")
        .env_remove("DINO_EXPLORER_ROOT")
        .env("RUST_LOG", "error");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run with `input` piped to stdin; the exit status is not checked.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().context("spawning dino-explorer")?;
    child
        .stdin
        .take()
        .context("stdin not captured")?
        .write_all(input.as_bytes())?;
    child.wait_with_output().context("waiting for dino-explorer")
}

pub fn record(name: &str, period: &str, diet: &str, description: &str) -> Value {
    json!({
        "name": name,
        "period": period,
        "diet": diet,
        "description": description,
    })
}

/// Two-record catalog used by the concrete filtering scenario.
pub fn scenario_records() -> Vec<Value> {
    vec![
        record(
            "Velociraptor",
            "Late Cretaceous",
            "Carnivore",
            "A small dromaeosaurid theropod.",
        ),
        record(
            "Triceratops",
            "Late Cretaceous",
            "Herbivore",
            "A large ceratopsid with three horns.",
        ),
    ]
}

/// Write `{"dinosaurs": records}` into a fresh temp dir.
pub fn write_catalog(records: Vec<Value>) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new().context("allocating catalog dir")?;
    let path = dir.path().join("catalog.json");
    write_json(&path, &json!({"schema_version": "dino_catalog_v1", "dinosaurs": records}))?;
    Ok((dir, path))
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
