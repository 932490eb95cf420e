use crate::db::DB;
use crate::errors::StoreError;
use std::{path::PathBuf, sync::Arc};

/// Builds rocksdb connections with the handful of knobs this node actually tunes.
#[derive(Debug, Clone)]
pub struct ConnBuilder {
    db_path: Option<PathBuf>,
    create_if_missing: bool,
    parallelism: usize,
}

impl Default for ConnBuilder {
    fn default() -> Self {
        ConnBuilder { db_path: None, create_if_missing: true, parallelism: 1 }
    }
}

impl ConnBuilder {
    pub fn with_db_path(self, db_path: PathBuf) -> Self {
        ConnBuilder { db_path: Some(db_path), ..self }
    }

    pub fn with_create_if_missing(self, create_if_missing: bool) -> Self {
        ConnBuilder { create_if_missing, ..self }
    }

    pub fn with_parallelism(self, parallelism: impl Into<usize>) -> Self {
        ConnBuilder { parallelism: parallelism.into(), ..self }
    }

    pub fn build(self) -> Result<Arc<DB>, StoreError> {
        let mut opts = rocksdb::Options::default();
        if self.parallelism > 1 {
            opts.increase_parallelism(self.parallelism as i32);
        }
        opts.create_if_missing(self.create_if_missing);
        let path = self.db_path.expect("the database path is expected to be set");
        let db = Arc::new(DB::open(&opts, path.to_str().unwrap())?);
        Ok(db)
    }
}
