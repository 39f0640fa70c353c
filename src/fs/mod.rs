//! FileSystem abstraction used by the module pipeline

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Permission bits for every file written into the target directory
pub const UNIT_FILE_MODE: u32 = 0o644;

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &OsStr {
        &self.name
    }

    /// File name for logs; invalid UTF-8 is replaced
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// Abstraction over the file system operations the pipeline performs
pub trait FileSystem {
    /// List directory contents, sorted by file name
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Copy `from` to `to` byte for byte, replacing `to` if it exists
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Write `contents` to `path`, replacing it if it exists
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// FileSystem backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl RealFileSystem {
    fn create(path: &Path) -> io::Result<fs::File> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(UNIT_FILE_MODE);
        }

        options.open(path)
    }
}

impl FileSystem for RealFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let ft = entry.file_type()?;
            // Links are not followed: a symlink to a directory is not a directory
            let file_type = if ft.is_dir() {
                FileType::Directory
            } else if ft.is_symlink() {
                FileType::Symlink
            } else {
                FileType::File
            };

            entries.push(DirEntry {
                path: entry.path(),
                name: entry.file_name(),
                file_type,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let mut src = fs::File::open(from)?;
        let mut dst = Self::create(to)?;
        io::copy(&mut src, &mut dst)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        use std::io::Write;

        let mut file = Self::create(path)?;
        file.write_all(contents)
    }
}
