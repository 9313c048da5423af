use std::error::Error;
use std::path::PathBuf;
use std::process::Command;
use std::{env, fs};

const PREVIEW_FILE: &str = "minipen-preview.html";

/// The isolated rendering surface. Assignment replaces the surface's content
/// with a full standalone document.
pub trait PreviewSurface {
    fn assign(&mut self, document: &str) -> Result<(), Box<dyn Error>>;
}

/// Surface backed by one app-owned HTML file; a browser tab pointed at it is
/// the actual sandbox. Reloading the tab picks up the latest assignment.
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new() -> Self {
        Self {
            path: env::temp_dir().join(PREVIEW_FILE),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Launches the platform opener on the surface file. A spawn failure is
    /// the popup-blocked condition of this environment; the caller surfaces it.
    pub fn open_in_browser(&self) -> Result<(), Box<dyn Error>> {
        if !self.path.exists() {
            return Err("no preview has been built yet".into());
        }
        let mut cmd = if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(&self.path);
            c
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]).arg(&self.path);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(&self.path);
            c
        };
        cmd.spawn()?;
        Ok(())
    }
}

impl Default for FileSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSurface for FileSurface {
    fn assign(&mut self, document: &str) -> Result<(), Box<dyn Error>> {
        fs::write(&self.path, document)?;
        Ok(())
    }
}

/// Test surface that records every assigned document.
#[derive(Default)]
pub struct CapturedSurface {
    pub assigned: Vec<String>,
}

impl CapturedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.assigned.last().map(|s| s.as_str())
    }
}

impl PreviewSurface for CapturedSurface {
    fn assign(&mut self, document: &str) -> Result<(), Box<dyn Error>> {
        self.assigned.push(document.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_surface_overwrites_on_each_assignment() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preview.html");
        let mut surface = FileSurface::at(path.clone());
        surface.assign("<p>one</p>").unwrap();
        surface.assign("<p>two</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>two</p>");
    }

    #[test]
    fn test_open_without_assignment_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let surface = FileSurface::at(temp_dir.path().join("never-written.html"));
        assert!(surface.open_in_browser().is_err());
    }

    #[test]
    fn test_captured_surface_records_in_order() {
        let mut surface = CapturedSurface::new();
        surface.assign("a").unwrap();
        surface.assign("b").unwrap();
        assert_eq!(surface.assigned, vec!["a", "b"]);
        assert_eq!(surface.last(), Some("b"));
    }
}
