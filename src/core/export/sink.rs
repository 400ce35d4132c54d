//! Output sink: path templating, directory creation and file writes

use super::plan::FormatTarget;
use crate::domain::{BackupError, Result, Zone};
use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file the sink wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,

    /// Bytes on disk (after compression)
    pub bytes: u64,
}

/// Destination for serialized zone backups
///
/// The engine writes each (zone, format) pair exactly once per run, and
/// paths embed the zone id, so implementations never see two concurrent
/// writes to one path.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Write `payload` for `zone` according to `target`
    async fn write(&self, target: &FormatTarget, zone: &Zone, payload: &[u8]) -> Result<WrittenFile>;
}

/// Writes backups to the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FileSink;

impl FileSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputSink for FileSink {
    async fn write(&self, target: &FormatTarget, zone: &Zone, payload: &[u8]) -> Result<WrittenFile> {
        write_file(
            &target.path,
            &zone.name,
            zone.id.as_str(),
            &target.file_ext,
            target.compress,
            payload,
        )
        .await
    }
}

/// Full destination path for a zone's backup file
///
/// `{path_root}/{zone_name}-{zone_id}.{file_ext}[.gz]`, with `{zone_name}`
/// and `{zone_id}` placeholders in `path_root` expanded.
pub fn destination(
    path_root: &str,
    zone_name: &str,
    zone_id: &str,
    file_ext: &str,
    compress: bool,
) -> PathBuf {
    let directory = expand_placeholders(path_root, zone_name, zone_id);
    let mut file_name = format!("{zone_name}-{zone_id}.{file_ext}");
    if compress {
        file_name.push_str(".gz");
    }
    Path::new(&directory).join(file_name)
}

/// Destination path for a zone under a format target
pub fn target_destination(target: &FormatTarget, zone: &Zone) -> PathBuf {
    destination(
        &target.path,
        &zone.name,
        zone.id.as_str(),
        &target.file_ext,
        target.compress,
    )
}

fn expand_placeholders(path_root: &str, zone_name: &str, zone_id: &str) -> String {
    path_root
        .replace("{zone_name}", zone_name)
        .replace("{zone_id}", zone_id)
}

/// Write one backup file, creating its directory first
///
/// An existing file at the destination is overwritten.
///
/// # Errors
///
/// Returns [`BackupError::Filesystem`] when the directory cannot be created
/// or the file cannot be written, and when the zone name would escape the
/// target directory.
pub async fn write_file(
    path_root: &str,
    zone_name: &str,
    zone_id: &str,
    file_ext: &str,
    compress: bool,
    payload: &[u8],
) -> Result<WrittenFile> {
    if zone_name.is_empty() || zone_name.contains(['/', '\\']) || zone_name == ".." {
        return Err(BackupError::Filesystem(format!(
            "Zone name '{zone_name}' cannot be used in a file name"
        )));
    }

    let path = destination(path_root, zone_name, zone_id, file_ext, compress);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            BackupError::Filesystem(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let data = if compress {
        gzip(payload)?
    } else {
        payload.to_vec()
    };

    fs::write(&path, &data).await.map_err(|e| {
        BackupError::Filesystem(format!("Failed to write {}: {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), bytes = data.len(), "Wrote backup file");

    Ok(WrittenFile {
        path,
        bytes: data.len() as u64,
    })
}

/// Gzip a payload with default compression
pub fn gzip(payload: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(payload.len() / 4), Compression::default());
    encoder
        .write_all(payload)
        .map_err(|e| BackupError::Filesystem(format!("Failed to compress payload: {e}")))?;
    encoder
        .finish()
        .map_err(|e| BackupError::Filesystem(format!("Failed to compress payload: {e}")))
}
