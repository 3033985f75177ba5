use std::fs;
use std::path::{Path, PathBuf};

use helio_engine::SpiceEngine;
use helio_store::{HttpClient, fetch_file};
use url::Url;

use crate::{KernelError, KernelResult, KernelSession, io_error};

/// Token the meta-kernel text uses for the directory holding its kernels.
const KERNELS_VAR: &str = "$KERNELS";

/// A meta-kernel: a text file listing other kernels to furnish, plus a
/// path-substitution directive for its own containing directory.
///
/// Lifecycle: [`MetaKernel::open`] parses the reference list,
/// [`MetaKernel::rewrite_path_values`] replaces the `'..'` placeholder with
/// the absolute containing directory (idempotent), [`MetaKernel::resolve`]
/// downloads any reference missing locally, and [`MetaKernel::furnish`]
/// hands every reference to the engine strictly in listed order before the
/// meta-kernel itself.
#[derive(Debug)]
pub struct MetaKernel {
    path: PathBuf,
    references: Vec<String>,
}

impl MetaKernel {
    pub fn open(path: impl Into<PathBuf>) -> KernelResult<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        let references = parse_references(&text);
        Ok(Self { path, references })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Relative references listed in `KERNELS_TO_LOAD`, in file order, with
    /// the `$KERNELS` token and leading separator stripped.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    fn dir(&self) -> KernelResult<PathBuf> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::path::absolute(parent).map_err(|e| io_error(parent, e))
    }

    /// Local paths the references resolve to, relative to the containing
    /// directory.
    pub fn referenced_paths(&self) -> KernelResult<Vec<PathBuf>> {
        let dir = self.dir()?;
        Ok(self.references.iter().map(|r| dir.join(r)).collect())
    }

    /// Whether every referenced kernel is already present locally.
    pub fn references_exist(&self) -> KernelResult<bool> {
        Ok(self.referenced_paths()?.iter().all(|p| p.exists()))
    }

    /// Rewrite the `PATH_VALUES = ( '..' )` assignment to the absolute
    /// containing directory so the engine can resolve references.
    ///
    /// Returns whether the file was modified; a file already rewritten is
    /// detected and left byte-identical.
    pub fn rewrite_path_values(&self) -> KernelResult<bool> {
        let text = fs::read_to_string(&self.path).map_err(|e| io_error(&self.path, e))?;
        let dir = self.dir()?;
        let dir = dir.to_string_lossy();

        let mut changed = false;
        let mut lines = Vec::new();
        for line in text.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let is_placeholder = tokens.len() > 1
                && tokens[0] == "PATH_VALUES"
                && tokens[tokens.len() - 2] == "'..'";
            if is_placeholder {
                lines.push(line.replace("..", &dir));
                changed = true;
            } else {
                lines.push(line.to_string());
            }
        }
        if !changed {
            return Ok(false);
        }

        let mut out = lines.join("\n");
        if text.ends_with('\n') {
            out.push('\n');
        }
        fs::write(&self.path, out).map_err(|e| io_error(&self.path, e))?;
        Ok(true)
    }

    /// Download every reference missing locally, joining `root` with the
    /// relative reference and keeping the subfolder layout the file expects.
    pub fn resolve(&self, root: &Url, client: &HttpClient) -> KernelResult<()> {
        let dir = self.dir()?;
        for reference in &self.references {
            let dest = dir.join(reference);
            if dest.exists() {
                continue;
            }
            let url = root.join(reference).map_err(|e| KernelError::MetaFormat {
                path: self.path.clone(),
                reason: format!("reference '{reference}' does not resolve against {root}: {e}"),
            })?;
            fetch_file(client, &url, &dest)?;
        }
        Ok(())
    }

    /// Furnish every referenced kernel in listed order, then the meta-kernel
    /// itself. Frame and clock definitions may depend on earlier entries, so
    /// the order is never changed.
    pub fn furnish<E: SpiceEngine>(&self, session: &mut KernelSession<E>) -> KernelResult<()> {
        for (reference, path) in self.references.iter().zip(self.referenced_paths()?) {
            if !path.exists() {
                return Err(KernelError::MissingReference {
                    meta: self.path.clone(),
                    reference: reference.clone(),
                });
            }
            session.ensure_furnished(&path)?;
        }
        session.ensure_furnished(&self.path)?;
        Ok(())
    }
}

fn parse_references(text: &str) -> Vec<String> {
    let mut references = Vec::new();
    let mut in_block = false;
    for line in text.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            continue;
        };
        if in_block {
            if first.starts_with(')') {
                break;
            }
            if let Some(reference) = parse_reference_token(first) {
                references.push(reference);
            }
        } else if *first == "KERNELS_TO_LOAD" && tokens.len() > 1 {
            in_block = true;
        }
    }
    references
}

fn parse_reference_token(token: &str) -> Option<String> {
    let inner = token.strip_prefix('\'')?.strip_suffix('\'')?;
    let relative = inner.strip_prefix(KERNELS_VAR)?.trim_start_matches('/');
    if relative.is_empty() {
        None
    } else {
        Some(relative.to_string())
    }
}
