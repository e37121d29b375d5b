//! The external document-merge seam.
//!
//! DOC/DOCX → HTML conversion is not this workspace's business; the merge
//! pass only needs "given these part files in order, produce one HTML file
//! at this path, or tell me you couldn't".

use std::{
  path::{Path, PathBuf},
  process::Command,
};

/// Merges ordered part files into a single HTML document.
///
/// Expected to be deterministic: merging the same parts to the same output
/// path produces the same document, so a failed group can simply be
/// retried on the next run.
pub trait DocumentMerger {
  /// Returns the merged markup, or `None` when conversion fails. On
  /// failure no partial output may be left behind at `out_path`.
  fn merge(&self, parts: &[PathBuf], out_path: &Path) -> Option<String>;
}

// ─── CommandMerger ───────────────────────────────────────────────────────────

/// Runs an external converter command (pandoc-style): the configured
/// program and fixed arguments, then the part paths in order, then
/// `--output <out_path>`.
pub struct CommandMerger {
  program: String,
  args:    Vec<String>,
}

impl CommandMerger {
  pub fn new(
    program: impl Into<String>,
    args: impl IntoIterator<Item = String>,
  ) -> Self {
    Self { program: program.into(), args: args.into_iter().collect() }
  }

  /// Build from a configured command line (program followed by fixed
  /// arguments). Returns `None` for an empty command.
  pub fn from_command(command: &[String]) -> Option<Self> {
    let (program, args) = command.split_first()?;
    Some(Self::new(program.clone(), args.to_vec()))
  }
}

impl DocumentMerger for CommandMerger {
  fn merge(&self, parts: &[PathBuf], out_path: &Path) -> Option<String> {
    let status = Command::new(&self.program)
      .args(&self.args)
      .args(parts)
      .arg("--output")
      .arg(out_path)
      .status();

    match status {
      Ok(status) if status.success() => {
        std::fs::read_to_string(out_path).ok()
      }
      Ok(status) => {
        tracing::debug!(program = %self.program, %status, "converter failed");
        let _ = std::fs::remove_file(out_path);
        None
      }
      Err(e) => {
        tracing::debug!(program = %self.program, error = %e, "converter did not run");
        None
      }
    }
  }
}
