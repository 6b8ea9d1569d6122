use chrono::{DateTime, FixedOffset, Utc};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Timestamp format used for every audit line and the Start/End Time lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator line closing each audit entry block.
pub const SEPARATOR: &str = "--------------------------------";

/// Append-only audit log, partitioned by wall-clock time into one file per
/// hour: `<root>/<YYYY>/<MM>/<DD>/<HH>.log`.
///
/// All timestamps are taken in a fixed UTC offset configured at startup, not
/// the host's local zone. The log exclusively owns its directory tree; there
/// is no read or query API and no rotation.
pub struct AuditLog {
    root: PathBuf,
    offset: FixedOffset,
    // Concurrent requests landing in the same hour append to the same file;
    // the lock keeps each block of lines contiguous.
    write_lock: Mutex<()>,
}

impl AuditLog {
    pub fn new(root: impl Into<PathBuf>, offset: FixedOffset) -> Self {
        Self {
            root: root.into(),
            offset,
            write_lock: Mutex::new(()),
        }
    }

    /// Current wall-clock time in the pinned offset. The single time source
    /// for path derivation and line timestamps.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    /// Path of the hour bucket for `at`, derived fresh on every call.
    fn file_path(&self, at: DateTime<FixedOffset>) -> PathBuf {
        self.root.join(at.format("%Y/%m/%d/%H.log").to_string())
    }

    /// Appends one timestamped line.
    pub fn log(&self, message: &str) -> io::Result<()> {
        self.append(&[message])
    }

    /// Appends a block of timestamped lines as one contiguous unit.
    ///
    /// The directory segments for the current hour are created on demand;
    /// an already-existing directory (e.g. created by an earlier call within
    /// the same hour) is not an error. Filesystem failures propagate to the
    /// caller unretried.
    pub fn append<S: AsRef<str>>(&self, lines: &[S]) -> io::Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| io::Error::other("audit log lock poisoned"))?;

        let at = self.now();
        let path = self.file_path(at);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        let timestamp = at.format(TIMESTAMP_FORMAT);
        for line in lines {
            writeln!(file, "[{}] {}", timestamp, line.as_ref())?;
        }
        Ok(())
    }
}
