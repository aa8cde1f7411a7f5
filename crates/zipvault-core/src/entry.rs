//! In-memory model of archive members.
//!
//! An archive is an ordered sequence of entries: regular files carrying a
//! payload, and directory markers that preserve tree structure (including
//! empty directories) across the round trip.

use crate::ArchiveError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Kind of archive member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file with a compressed, encrypted payload.
    File,
    /// Zero-length marker preserving a directory; its name ends with `/`.
    DirectoryMarker,
}

/// One member of an archive, described before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Filesystem path the entry is read from.
    pub source: PathBuf,

    /// Entry path inside the archive: POSIX-style, relative to the
    /// archive's logical root. Directory markers carry a trailing slash.
    pub name: String,

    /// Kind of member.
    pub kind: EntryKind,

    /// Size in bytes (0 for directory markers).
    pub size: u64,
}

/// Enumerates the entries an archive of `source` will contain.
///
/// A single file produces exactly one entry named by the file's base name.
/// A directory is walked recursively: every subdirectory (including empty
/// ones) yields a `DirectoryMarker`, every regular file a `File` entry,
/// and all names are prefixed with the directory's base name so extraction
/// reconstructs one top-level folder matching the source.
///
/// Walk order is top-down, so a directory's marker precedes its contents.
///
/// # Errors
///
/// Returns `SourceNotFound` if `source` does not exist, and an I/O error
/// if the tree cannot be read or a path is not valid UTF-8.
///
/// # Examples
///
/// ```no_run
/// use zipvault_core::entry::collect_entries;
/// use std::path::Path;
///
/// let entries = collect_entries(Path::new("./project"))?;
/// for entry in &entries {
///     println!("{}", entry.name);
/// }
/// # Ok::<(), zipvault_core::ArchiveError>(())
/// ```
pub fn collect_entries(source: &Path) -> Result<Vec<ArchiveEntry>> {
    if !source.exists() {
        return Err(ArchiveError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    let root_name = base_name(source)?;

    if source.is_file() {
        let size = source.metadata()?.len();
        return Ok(vec![ArchiveEntry {
            source: source.to_path_buf(),
            name: root_name,
            kind: EntryKind::File,
            size,
        }]);
    }

    let mut entries = Vec::new();
    for dir_entry in WalkDir::new(source) {
        let dir_entry = dir_entry.map_err(|e| {
            ArchiveError::Io(std::io::Error::other(format!("walkdir error: {e}")))
        })?;
        if dir_entry.depth() == 0 {
            // The root folder itself is implied by the prefix on every name.
            continue;
        }

        let path = dir_entry.path();
        let relative = path.strip_prefix(source).map_err(|_| {
            ArchiveError::Io(std::io::Error::other(format!(
                "entry {} is outside its walk root",
                path.display()
            )))
        })?;
        let posix = posix_name(relative)?;

        if dir_entry.file_type().is_dir() {
            entries.push(ArchiveEntry {
                source: path.to_path_buf(),
                name: format!("{root_name}/{posix}/"),
                kind: EntryKind::DirectoryMarker,
                size: 0,
            });
        } else {
            let size = dir_entry.metadata().map_or(0, |m| m.len());
            entries.push(ArchiveEntry {
                source: path.to_path_buf(),
                name: format!("{root_name}/{posix}"),
                kind: EntryKind::File,
                size,
            });
        }
    }

    Ok(entries)
}

/// Returns the base name of a source path as a UTF-8 string.
pub(crate) fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            ArchiveError::Io(std::io::Error::other(format!(
                "cannot determine archive name for {}",
                path.display()
            )))
        })
}

/// Converts a relative filesystem path to a POSIX archive name.
///
/// ZIP entry names use forward slashes on every platform.
fn posix_name(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    ArchiveError::Io(std::io::Error::other(format!(
                        "path is not valid UTF-8: {}",
                        relative.display()
                    )))
                })?;
                parts.push(part);
            }
            // strip_prefix output never contains these
            _ => {
                return Err(ArchiveError::Io(std::io::Error::other(format!(
                    "unexpected path component in {}",
                    relative.display()
                ))));
            }
        }
    }
    Ok(parts.join("/"))
}
