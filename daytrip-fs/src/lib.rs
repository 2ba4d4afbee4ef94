//! Capability-based UTF-8 file helpers built on `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Open a UTF-8 file path for reading using ambient authority.
///
/// # Errors
///
/// Returns the underlying IO error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory containing `path` and return it with the file name.
///
/// A bare file name resolves against the current directory.
///
/// # Errors
///
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether a path exists and is a regular file using capability-based IO.
///
/// # Errors
///
/// A missing file or parent directory surfaces as
/// [`io::ErrorKind::NotFound`].
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

#[cfg(test)]
mod tests {
    //! Exercises the helpers against a scratch directory.

    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::io::Read;
    use tempfile::TempDir;

    struct Scratch {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn scratch() -> Scratch {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Scratch { _dir: dir, root }
    }

    #[rstest]
    fn opens_and_reads_a_file(scratch: Scratch) {
        let path = scratch.root.join("schedule.json");
        std::fs::write(&path, "{}").expect("write file");

        let mut contents = String::new();
        open_utf8_file(&path)
            .expect("file opens")
            .read_to_string(&mut contents)
            .expect("file reads");
        assert_eq!(contents, "{}");
    }

    #[rstest]
    fn regular_files_are_files(scratch: Scratch) {
        let path = scratch.root.join("schedule.json");
        std::fs::write(&path, "{}").expect("write file");
        assert!(file_is_file(&path).expect("metadata available"));
    }

    #[rstest]
    fn directories_are_not_files(scratch: Scratch) {
        let path = scratch.root.join("nested");
        std::fs::create_dir(&path).expect("create dir");
        assert!(!file_is_file(&path).expect("metadata available"));
    }

    #[rstest]
    fn missing_paths_report_not_found(scratch: Scratch) {
        let err = file_is_file(&scratch.root.join("absent.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let err = file_is_file(&scratch.root.join("absent/schedule.json"))
            .expect_err("missing parent");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn bare_names_resolve_against_the_current_directory() {
        let (_, name) = open_dir_and_file(Utf8Path::new("Cargo.toml")).expect("crate root opens");
        assert_eq!(name, "Cargo.toml");
    }
}
