//! LMDB environment setup.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// Number of named databases the ledger opens.
pub const LEDGER_DBS: u32 = 4;

/// Default map size: 1 GiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    pub(crate) env: Env,
    pub(crate) certificates_db: Database<Bytes, Bytes>,
    pub(crate) disposals_db: Database<Bytes, Bytes>,
    pub(crate) owners_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory must already exist.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        let max_dbs = max_dbs.max(LEDGER_DBS);
        // SAFETY: the environment is opened once per path within this process
        // and the map is never resized while transactions are live.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let certificates_db = env.create_database(&mut wtxn, Some("certificates"))?;
        let disposals_db = env.create_database(&mut wtxn, Some("disposals"))?;
        let owners_db = env.create_database(&mut wtxn, Some("owners"))?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env,
            certificates_db,
            disposals_db,
            owners_db,
            meta_db,
        })
    }

    /// Open with the default map size.
    pub fn open_default(path: &Path) -> Result<Self, LmdbError> {
        Self::open(path, LEDGER_DBS, DEFAULT_MAP_SIZE)
    }

    pub fn env(&self) -> &Env {
        &self.env
    }
}

#[cfg(test)]
pub(crate) fn open_test_env() -> (tempfile::TempDir, LmdbEnvironment) {
    let dir = tempfile::tempdir().unwrap();
    let env = LmdbEnvironment::open(dir.path(), LEDGER_DBS, 1 << 20).unwrap();
    (dir, env)
}
