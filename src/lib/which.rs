//! Executable discovery in `PATH`

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Locate an executable by name, like the shell's `which`.
///
/// A name with path components is checked as given.
pub fn which(bin: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH").unwrap_or_default();
    which_in(bin, &path)
}

/// Check if a command is available on the system
pub fn is_command_available(command: &str) -> bool {
    which(command).is_some()
}

/// Search `bin` in the directories of a `PATH`-style list.
///
/// An empty entry stands for the current directory, as execvp(3) reads it.
pub fn which_in(bin: &str, path: &OsStr) -> Option<PathBuf> {
    if bin.is_empty() {
        return None;
    }
    let candidate = Path::new(bin);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    std::env::split_paths(path).find_map(|dir| {
        let dir = if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        };
        candidates(&dir, bin).find(|file| is_executable(file))
    })
}

#[cfg(not(windows))]
fn candidates(dir: &Path, bin: &str) -> impl Iterator<Item = PathBuf> {
    std::iter::once(dir.join(bin))
}

#[cfg(windows)]
fn candidates(dir: &Path, bin: &str) -> impl Iterator<Item = PathBuf> {
    let extensions = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    let with_ext: Vec<PathBuf> = extensions
        .split(';')
        .filter(|ext| !ext.is_empty())
        .map(|ext| dir.join(format!("{}{}", bin, ext.to_ascii_lowercase())))
        .collect();
    std::iter::once(dir.join(bin)).chain(with_ext)
}

#[cfg(unix)]
fn is_executable(file: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    file.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(file: &Path) -> bool {
    file.is_file()
}
