// Zip archive unpacking
//
// Dataset archives are plain `.zip` files whose top-level entry is the dataset
// directory itself, so unpacking `<root>/<name>.zip` into `<root>` produces
// `<root>/<name>/{train,test}/...`.
//
// Entries whose names would escape the destination (absolute paths, `..`) are
// skipped. If unpacking fails partway, already-written files are left in place.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use genbench_core::{Error, Result};

fn archive_err(path: &Path, e: zip::result::ZipError) -> Error {
    Error::Archive {
        path: path.to_path_buf(),
        source: e.into(),
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Unpack every entry of the zip file at `archive` into `dest`.
///
/// Returns the number of regular files written.
pub fn unpack_zip(archive: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| archive_err(archive, e))?;
    fs::create_dir_all(dest)?;

    let mut written = 0;
    // Directory modes are applied last; a read-only directory would otherwise
    // reject its own children.
    let mut dir_modes: Vec<(PathBuf, u32)> = Vec::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| archive_err(archive, e))?;
        let outpath = match entry.enclosed_name() {
            Some(p) => dest.join(p),
            None => {
                log::warn!("skipping unsafe archive entry '{}'", entry.name());
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            io::copy(&mut entry, &mut outfile)?;
            written += 1;
        }

        if let Some(mode) = entry.unix_mode() {
            if entry.is_dir() {
                dir_modes.push((outpath, mode));
            } else {
                set_mode(&outpath, mode)?;
            }
        }
    }

    // Deepest first, so a parent's mode never blocks a child's chmod.
    dir_modes.sort_by_key(|(p, _)| std::cmp::Reverse(p.components().count()));
    for (path, mode) in &dir_modes {
        set_mode(path, *mode)?;
    }

    log::debug!(
        "unpacked {} files from {} into {}",
        written,
        archive.display(),
        dest.display()
    );
    Ok(written)
}
