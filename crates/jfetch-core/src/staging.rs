//! Temp-file lifecycle for a download.
//!
//! The body is streamed into `<final>.download` and renamed onto the final
//! path only after the whole copy succeeded, so a file at the final name is
//! always complete.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::FetchError;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".download";

/// Path for the temp file: appends `.download` to the final path
/// (e.g. `setup.exe` → `setup.exe.download`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writer that can be made durable before the rename.
pub trait StagingWriter: Write {
    /// Flush buffers and sync data to disk.
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl StagingWriter for BufWriter<File> {
    fn sync(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_ref().sync_all()
    }
}

/// Open temp file receiving a response body.
pub struct StagingFile<W: StagingWriter = BufWriter<File>> {
    writer: W,
    temp_path: PathBuf,
    written: u64,
}

impl StagingFile {
    /// Creates (or truncates) the temp file next to `final_path`.
    pub fn create(final_path: &Path) -> Result<Self, FetchError> {
        let temp_path = temp_path(final_path);
        let file = File::create(&temp_path).map_err(|e| FetchError::io(&temp_path, e))?;
        Ok(Self::from_writer(temp_path, BufWriter::new(file)))
    }
}

impl<W: StagingWriter> StagingFile<W> {
    pub fn from_writer(temp_path: PathBuf, writer: W) -> Self {
        Self {
            writer,
            temp_path,
            written: 0,
        }
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> Result<(), FetchError> {
        self.writer
            .write_all(data)
            .map_err(|e| FetchError::io(&self.temp_path, e))?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Syncs and closes the temp file, then atomically renames it to
    /// `final_path`. On error the caller must not assume `final_path` exists.
    pub fn publish(self, final_path: &Path) -> Result<PathBuf, FetchError> {
        let StagingFile {
            mut writer,
            temp_path,
            written,
        } = self;
        writer.sync().map_err(|e| FetchError::io(&temp_path, e))?;
        drop(writer);

        std::fs::rename(&temp_path, final_path).map_err(|e| FetchError::io(final_path, e))?;
        tracing::debug!(
            bytes = written,
            path = %final_path.display(),
            "published download"
        );
        Ok(final_path.to_path_buf())
    }
}
