//! Destination-escape validation for decoded entry paths.
//!
//! A maliciously crafted archive can carry entry names like `../../evil`
//! or `/etc/passwd`. Every decoded name passes through here before
//! anything is created under the extraction root.

use crate::ArchiveError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Validates a decoded entry name and returns the relative path to create.
///
/// Rejects NUL bytes, absolute paths, and any `..` component; `.`
/// components are dropped. An entry that normalizes to nothing is also
/// rejected. All rejections are `PathTraversal`, which callers treat as a
/// data-integrity failure of the archive.
pub(crate) fn sanitized_entry_path(name: &str) -> Result<PathBuf> {
    if name.contains('\0') {
        return Err(traversal(name));
    }

    let mut sanitized = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => sanitized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(traversal(name));
            }
        }
    }

    if sanitized.as_os_str().is_empty() {
        return Err(traversal(name));
    }
    Ok(sanitized)
}

fn traversal(name: &str) -> ArchiveError {
    ArchiveError::PathTraversal {
        path: PathBuf::from(name),
    }
}
