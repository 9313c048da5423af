use crate::assemble::build_document;
use crate::snapshot::EditorSnapshot;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::fs;

pub const ARCHIVE_NAME: &str = "minipen.zip";
pub const FALLBACK_NAME: &str = "preview.html";

/// Thin viewer page that embeds the combined document in a sandboxed frame.
const INDEX_VIEWER: &str = "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width,initial-scale=1\"><title>Preview - minipen</title>\n<style>html,body{height:100%;margin:0}iframe{width:100%;height:100%;border:0}</style>\n</head>\n<body><iframe src=\"preview.html\" sandbox=\"allow-scripts allow-same-origin\"></iframe></body>\n</html>\n";

const README: &str = "minipen export\nFiles:\n - preview.html  (combined runnable page)\n - code.html     (your HTML)\n - code.css      (your CSS)\n - code.js       (your JS)\n - index.html    (viewer that opens preview.html)\n\nOpen index.html in a browser or open preview.html directly.\n";

/// Archiving capability. Resolved once by the caller; `None` means the
/// dependency is unavailable and export falls straight through to the
/// single-file path.
pub trait Archiver {
    fn write_bundle(&self, dest: &Path, entries: &[(&str, &str)]) -> Result<(), Box<dyn Error>>;
}

pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn write_bundle(&self, dest: &Path, entries: &[(&str, &str)]) -> Result<(), Box<dyn Error>> {
        let file = fs::File::create(dest)?;
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in entries {
            zip.start_file(*name, options)?;
            zip.write_all(content.as_bytes())?;
        }
        zip.finish()?;
        Ok(())
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExportOutcome {
    /// Full bundle was written to this path.
    Archive(PathBuf),
    /// Archiving was unavailable or failed; the combined document alone was
    /// written to this path.
    SingleFile(PathBuf),
}

impl ExportOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ExportOutcome::Archive(p) | ExportOutcome::SingleFile(p) => p,
        }
    }
}

/// Builds the export bundle in `dest_dir`. All-or-nothing per attempt: a
/// half-written archive is removed before falling back, and the fallback is
/// always the full combined document as one file. An error here means not
/// even the fallback could be written.
pub fn export_bundle(
    snapshot: &EditorSnapshot,
    dest_dir: &Path,
    archiver: Option<&dyn Archiver>,
) -> Result<ExportOutcome, Box<dyn Error>> {
    let preview = build_document(snapshot);

    if let Some(archiver) = archiver {
        let entries: [(&str, &str); 6] = [
            ("preview.html", preview.as_str()),
            ("code.html", snapshot.html.as_str()),
            ("code.css", snapshot.css.as_str()),
            ("code.js", snapshot.js.as_str()),
            ("index.html", INDEX_VIEWER),
            ("README.txt", README),
        ];
        let archive_path = dest_dir.join(ARCHIVE_NAME);
        match archiver.write_bundle(&archive_path, &entries) {
            Ok(()) => return Ok(ExportOutcome::Archive(archive_path)),
            Err(e) => {
                log::warn!("archive write failed ({}), falling back to single file", e);
                let _ = fs::remove_file(&archive_path);
            }
        }
    }

    let fallback_path = dest_dir.join(FALLBACK_NAME);
    fs::write(&fallback_path, preview)?;
    Ok(ExportOutcome::SingleFile(fallback_path))
}
