use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and stream utilities

// @const: Path that stands for stdin or stdout
pub const STDIO_PATH: &str = "-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    pub fn is_stdio<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().as_os_str() == STDIO_PATH
    }

    /// Read a file to a string; `-` reads stdin
    pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if Self::is_stdio(path) {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read from stdin")?;
            return Ok(content);
        }
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    /// Write bytes to `path`, or stdout when `path` is absent or `-`
    pub fn write_output(path: Option<&Path>, content: &[u8]) -> Result<()> {
        match path {
            Some(path) if !Self::is_stdio(path) => Self::write_to_file(path, content),
            _ => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content).context("Failed to write to stdout")?;
                stdout.write_all(b"\n").context("Failed to write to stdout")?;
                stdout.flush().context("Failed to flush stdout")
            }
        }
    }

    /// Write bytes to a file, creating parent directories
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let extension = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }
}
