//! The logger state machine.
//!
//! A [`Logger`] owns the admission threshold, the configured buffer capacity,
//! and at most one live [`Session`]. The threshold is independent of the
//! session: it can be changed before `initialize` and survives `terminate`.

use std::path::Path;

use sqlog_core::{LogLevel, Result, SqlogError};
use sqlog_settings::{DEFAULT_CAPACITY, SqlogSettings};
use tracing::warn;

use crate::entry::Record;
use crate::session::Session;
use crate::storage::{LogStorage, SqliteOptions, SqliteStorage};

/// Buffered, level-filtered logger over a [`LogStorage`].
#[derive(Debug)]
pub struct Logger<S: LogStorage = SqliteStorage> {
    threshold: LogLevel,
    capacity: usize,
    options: SqliteOptions,
    session: Option<Session<S>>,
}

impl<S: LogStorage> Default for Logger<S> {
    fn default() -> Self {
        Self {
            threshold: LogLevel::default(),
            capacity: DEFAULT_CAPACITY,
            options: SqliteOptions::default(),
            session: None,
        }
    }
}

impl<S: LogStorage> Logger<S> {
    /// An uninitialized logger whose sessions buffer `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            warn!("rejected zero buffer capacity");
            return Err(SqlogError::InvalidArgument(
                "capacity must be positive".into(),
            ));
        }
        Ok(Self {
            capacity,
            ..Self::default()
        })
    }

    /// An uninitialized logger configured from `settings`.
    pub fn from_settings(settings: &SqlogSettings) -> Result<Self> {
        let mut logger = Self::new(settings.buffer.capacity)?;
        logger.threshold = settings.level;
        logger.options = SqliteOptions::from(&settings.store);
        Ok(logger)
    }

    /// Start a session over an already-open storage handle.
    pub fn attach(&mut self, storage: S) -> Result<()> {
        if self.session.is_some() {
            warn!("logger already initialized");
            return Err(SqlogError::AlreadyInitialized);
        }
        self.session = Some(Session::new(storage, self.capacity));
        Ok(())
    }

    /// End the live session: flush what is pending, then release storage.
    ///
    /// The logger is uninitialized afterwards even when the final flush
    /// fails; that flush error is returned.
    pub fn terminate(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            warn!("terminate called without a live session");
            return Err(SqlogError::NotInitialized);
        };
        session.close().inspect_err(|e| {
            warn!(error = %e, "log session closed with error");
        })
    }

    /// Replace the admission threshold.
    pub fn set_level(&mut self, level: LogLevel) {
        self.threshold = level;
    }

    /// Replace the admission threshold from its ordinal.
    pub fn set_level_code(&mut self, code: i32) -> Result<()> {
        let level = LogLevel::try_from(code).inspect_err(|_| {
            warn!(code, "rejected log level");
        })?;
        self.set_level(level);
        Ok(())
    }

    /// Current admission threshold.
    pub fn level(&self) -> LogLevel {
        self.threshold
    }

    /// Whether an entry at `level` would be buffered.
    pub fn admits(&self, level: LogLevel) -> bool {
        LogLevel::admits(self.threshold, level)
    }

    /// Submit a record.
    ///
    /// Records below the threshold are dropped and report success. When the
    /// buffer is full it is flushed first; if that flush fails the record is
    /// not buffered and the flush error is returned.
    pub fn log(&mut self, record: &Record<'_>) -> Result<()> {
        if record.message.is_empty() {
            warn!("rejected empty log message");
            return Err(SqlogError::InvalidArgument("message is empty".into()));
        }
        let threshold = self.threshold;
        let Some(session) = self.session.as_mut() else {
            warn!("log called without a live session");
            return Err(SqlogError::NotInitialized);
        };
        if !LogLevel::admits(threshold, record.level) {
            return Ok(());
        }
        session.submit(record)
    }

    /// Flush pending entries now.
    pub fn flush(&mut self) -> Result<()> {
        match self.session.as_mut() {
            Some(session) => session.flush(),
            None => Err(SqlogError::NotInitialized),
        }
    }

    /// Whether a session is live.
    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Entries buffered in the live session (0 without one).
    pub fn pending(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.buffer().len())
    }

    /// Buffer capacity used by each session.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The live session's storage.
    pub fn storage(&self) -> Option<&S> {
        self.session.as_ref().map(Session::storage)
    }
}

impl Logger<SqliteStorage> {
    /// Open or create the database at `path` and start a session.
    pub fn initialize(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            warn!("rejected empty database path");
            return Err(SqlogError::InvalidArgument("path is empty".into()));
        }
        if self.session.is_some() {
            warn!("logger already initialized");
            return Err(SqlogError::AlreadyInitialized);
        }
        let storage = SqliteStorage::open(path, &self.options)?;
        self.attach(storage)
    }

    /// The live session's table name.
    pub fn table_name(&self) -> Option<&str> {
        self.storage().map(SqliteStorage::table_name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use sqlog_settings::{BufferSettings, StoreSettings};

    fn logger(capacity: usize) -> (Logger<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let mut logger = Logger::new(capacity).unwrap();
        logger.attach(storage.clone()).unwrap();
        (logger, storage)
    }

    fn info(msg: &str) -> Record<'_> {
        Record::new(msg, LogLevel::Info)
    }

    // ── construction ────────────────────────────────────────────────────

    #[test]
    fn zero_capacity_rejected() {
        let err = Logger::<MemoryStorage>::new(0).unwrap_err();
        assert!(matches!(err, SqlogError::InvalidArgument(_)));
    }

    #[test]
    fn defaults() {
        let logger = Logger::<MemoryStorage>::default();
        assert_eq!(logger.capacity(), DEFAULT_CAPACITY);
        assert_eq!(logger.level(), LogLevel::Info);
        assert!(!logger.is_initialized());
        assert_eq!(logger.pending(), 0);
    }

    #[test]
    fn from_settings_applies_level_and_capacity() {
        let settings = SqlogSettings {
            level: LogLevel::Warning,
            buffer: BufferSettings { capacity: 16 },
            store: StoreSettings { busy_timeout_ms: 10 },
        };
        let logger = Logger::<MemoryStorage>::from_settings(&settings).unwrap();
        assert_eq!(logger.level(), LogLevel::Warning);
        assert_eq!(logger.capacity(), 16);
    }

    // ── lifecycle ───────────────────────────────────────────────────────

    #[test]
    fn attach_twice_fails() {
        let (mut logger, _) = logger(4);
        let err = logger.attach(MemoryStorage::new()).unwrap_err();
        assert!(matches!(err, SqlogError::AlreadyInitialized));
        assert!(logger.is_initialized());
    }

    #[test]
    fn terminate_without_session_fails() {
        let mut logger = Logger::<MemoryStorage>::new(4).unwrap();
        assert!(matches!(
            logger.terminate().unwrap_err(),
            SqlogError::NotInitialized
        ));
    }

    #[test]
    fn terminate_flushes_and_closes() {
        let (mut logger, storage) = logger(4);
        logger.log(&info("a")).unwrap();
        logger.terminate().unwrap();
        assert_eq!(storage.rows().len(), 1);
        assert!(storage.is_closed());
        assert!(!logger.is_initialized());
    }

    #[test]
    fn terminate_propagates_flush_error_but_ends_uninitialized() {
        let (mut logger, storage) = logger(4);
        logger.log(&info("a")).unwrap();
        storage.fail_commit(true);

        let err = logger.terminate().unwrap_err();
        assert!(matches!(err, SqlogError::Storage(_)));
        assert!(!logger.is_initialized());
        assert!(storage.is_closed());
        assert!(storage.rows().is_empty());
    }

    #[test]
    fn reattach_after_terminate() {
        let (mut logger, _) = logger(4);
        logger.terminate().unwrap();
        let second = MemoryStorage::new();
        logger.attach(second.clone()).unwrap();
        logger.log(&info("again")).unwrap();
        logger.terminate().unwrap();
        assert_eq!(second.rows()[0].message(), "again");
    }

    // ── levels ──────────────────────────────────────────────────────────

    #[test]
    fn level_survives_sessions() {
        let (mut logger, _) = logger(4);
        logger.set_level(LogLevel::Error);
        logger.terminate().unwrap();
        assert_eq!(logger.level(), LogLevel::Error);
    }

    #[test]
    fn set_level_code_rejects_out_of_range() {
        let mut logger = Logger::<MemoryStorage>::default();
        logger.set_level_code(3).unwrap();
        assert_eq!(logger.level(), LogLevel::Warning);

        for code in [-1, 6, 42] {
            let err = logger.set_level_code(code).unwrap_err();
            assert!(matches!(err, SqlogError::InvalidArgument(_)));
        }
        assert_eq!(logger.level(), LogLevel::Warning);
    }

    #[test]
    fn threshold_none_suppresses_everything() {
        let (mut logger, _) = logger(4);
        logger.set_level(LogLevel::None);
        for level in LogLevel::ALL {
            logger.log(&Record::new("x", level)).unwrap();
        }
        assert_eq!(logger.pending(), 0);
    }

    // ── submit ──────────────────────────────────────────────────────────

    #[test]
    fn empty_message_rejected_before_session_check() {
        let mut logger = Logger::<MemoryStorage>::default();
        let err = logger.log(&info("")).unwrap_err();
        assert!(matches!(err, SqlogError::InvalidArgument(_)));
    }

    #[test]
    fn log_without_session_fails() {
        let mut logger = Logger::<MemoryStorage>::default();
        let err = logger.log(&info("hello")).unwrap_err();
        assert!(matches!(err, SqlogError::NotInitialized));
    }

    #[test]
    fn below_threshold_dropped_even_when_buffer_full() {
        let (mut logger, storage) = logger(2);
        logger.set_level(LogLevel::Warning);
        logger.log(&Record::new("w", LogLevel::Warning)).unwrap();
        logger.log(&info("dropped")).unwrap();
        assert_eq!(logger.pending(), 1);
        assert_eq!(storage.transactions(), 0);
    }

    #[test]
    fn fewer_than_capacity_submissions_do_not_flush() {
        let (mut logger, storage) = logger(8);
        for i in 0..7 {
            logger.log(&info(&format!("m{i}"))).unwrap();
        }
        assert_eq!(logger.pending(), 7);
        assert_eq!(storage.transactions(), 0);
    }

    #[test]
    fn capacity_th_submission_flushes_once() {
        let (mut logger, storage) = logger(8);
        for i in 0..8 {
            logger.log(&info(&format!("m{i}"))).unwrap();
        }
        assert_eq!(storage.transactions(), 1);
        assert_eq!(storage.rows().len(), 7);
        assert_eq!(logger.pending(), 1);
    }

    #[test]
    fn failed_flush_keeps_state_and_retry_succeeds() {
        let (mut logger, storage) = logger(4);
        logger.log(&info("a")).unwrap();
        logger.log(&info("b")).unwrap();

        storage.fail_insert_at(Some(1));
        assert!(logger.flush().is_err());
        assert_eq!(logger.pending(), 2);
        assert!(storage.rows().is_empty());

        storage.fail_insert_at(None);
        logger.flush().unwrap();
        assert_eq!(logger.pending(), 0);
        let messages: Vec<_> = storage.rows().iter().map(|e| e.message().to_owned()).collect();
        assert_eq!(messages, ["a", "b"]);
    }

    #[test]
    fn flush_without_session_fails() {
        let mut logger = Logger::<MemoryStorage>::default();
        assert!(matches!(logger.flush().unwrap_err(), SqlogError::NotInitialized));
    }

    #[test]
    fn initialize_rejects_empty_path() {
        let mut logger = Logger::<SqliteStorage>::default();
        let err = logger.initialize("").unwrap_err();
        assert!(matches!(err, SqlogError::InvalidArgument(_)));
        assert!(!logger.is_initialized());
    }

    #[test]
    fn initialize_failure_leaves_uninitialized() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = Logger::<SqliteStorage>::default();
        let err = logger
            .initialize(dir.path().join("missing").join("log.db"))
            .unwrap_err();
        assert!(matches!(err, SqlogError::Storage(_)));
        assert!(!logger.is_initialized());
        assert!(logger.table_name().is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn level() -> impl Strategy<Value = LogLevel> {
            (0..=5i32).prop_map(|code| LogLevel::try_from(code).unwrap())
        }

        proptest! {
            #[test]
            fn buffers_iff_admitted(threshold in level(), entry in level()) {
                let (mut logger, _) = logger(8);
                logger.set_level(threshold);
                logger.log(&Record::new("m", entry)).unwrap();
                let expected = entry != LogLevel::None && entry >= threshold;
                prop_assert_eq!(logger.pending(), usize::from(expected));
            }
        }
    }
}
