use crate::db::DB;
use std::sync::Weak;
use tempfile::TempDir;

/// Test helper keeping a temp dir alive for as long as its DB is referenced.
/// On drop, waits for all DB references to be released before removing the dir.
pub struct DbLifetime {
    weak_db_ref: Weak<DB>,
    optional_tempdir: Option<TempDir>,
}

impl DbLifetime {
    pub fn new(tempdir: TempDir, weak_db_ref: Weak<DB>) -> Self {
        Self { optional_tempdir: Some(tempdir), weak_db_ref }
    }
}

impl Drop for DbLifetime {
    fn drop(&mut self) {
        while self.weak_db_ref.strong_count() > 0 {
            // Sleep and yield to the DB-holding threads
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        if let Some(dir) = self.optional_tempdir.take() {
            let options = rocksdb::Options::default();
            let path_buf = dir.path().to_owned();
            let path = path_buf.to_str().unwrap();
            DB::destroy(&options, path).expect("DB is expected to be deletable");
        }
    }
}

pub fn get_ember_tempdir() -> TempDir {
    tempfile::tempdir().expect("creating a temp directory is expected to succeed")
}

/// Creates a DB within a fresh temp directory.
/// Callers must keep the `DbLifetime` guard for the entire lifetime of the DB.
#[macro_export]
macro_rules! create_temp_db {
    ($conn_builder: expr) => {{
        let db_tempdir = $crate::prelude::get_ember_tempdir();
        let db_path = db_tempdir.path().to_owned();
        let db = $conn_builder.with_db_path(db_path).build().unwrap();
        ($crate::prelude::DbLifetime::new(db_tempdir, std::sync::Arc::downgrade(&db)), db)
    }};
}
