use std::{
    fs,
    ops::Deref,
    path::{Path, PathBuf},
};

use serde::{Serialize, Serializer, de::DeserializeOwned, ser::SerializeSeq};
use serde_json::Value;
use tracing::warn;

use crate::{
    error::StoreError,
    models::{DrawRecord, Participant, Prize, User},
};

pub const USERS_FILE: &str = "usuarios.json";
pub const PRIZES_FILE: &str = "premios.json";
pub const PARTICIPANTS_FILE: &str = "filiados.json";
pub const DRAWS_FILE: &str = "sorteios.json";

/// Rows of one file. Rows that do not fit `T` are held as raw JSON and
/// written back after the typed ones, so a rewrite never drops them.
#[derive(Debug, Clone, PartialEq)]
pub struct Records<T> {
    items: Vec<T>,
    unreadable: Vec<Value>,
}

impl<T> Records<T> {
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn unreadable(&self) -> &[Value] {
        &self.unreadable
    }

    /// Whether an unreadable row carries `value` under the string field `key`.
    pub fn unreadable_has(&self, key: &str, value: &str) -> bool {
        self.unreadable
            .iter()
            .any(|row| row.get(key).and_then(Value::as_str) == Some(value))
    }
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            unreadable: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for Records<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            unreadable: Vec::new(),
        }
    }
}

impl<T> Deref for Records<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: Serialize> Serialize for Records<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len() + self.unreadable.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        for row in &self.unreadable {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

/// The four record files of one data directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
    users: PathBuf,
    prizes: PathBuf,
    participants: PathBuf,
    draws: PathBuf,
}

impl Store {
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();

        Self {
            users: dir.join(USERS_FILE),
            prizes: dir.join(PRIZES_FILE),
            participants: dir.join(PARTICIPANTS_FILE),
            draws: dir.join(DRAWS_FILE),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn users(&self) -> Records<User> {
        load(&self.users)
    }

    pub fn prizes(&self) -> Records<Prize> {
        load(&self.prizes)
    }

    pub fn participants(&self) -> Records<Participant> {
        load(&self.participants)
    }

    pub fn draws(&self) -> Records<DrawRecord> {
        load(&self.draws)
    }

    pub fn save_users(&self, users: &Records<User>) -> Result<(), StoreError> {
        self.save(&self.users, users)
    }

    pub fn save_prizes(&self, prizes: &Records<Prize>) -> Result<(), StoreError> {
        self.save(&self.prizes, prizes)
    }

    pub fn save_participants(
        &self,
        participants: &Records<Participant>,
    ) -> Result<(), StoreError> {
        self.save(&self.participants, participants)
    }

    pub fn save_draws(&self, draws: &Records<DrawRecord>) -> Result<(), StoreError> {
        self.save(&self.draws, draws)
    }

    fn save<T: Serialize>(&self, path: &Path, records: &Records<T>) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut json = serde_json::to_string_pretty(records)?;
        json.push('\n');

        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Records<T> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            if path.exists() {
                warn!("Failed to read {}: {e}, treating as empty", path.display());
            }
            return Records::default();
        }
    };

    let rows: Vec<Value> = match serde_json::from_str(&data) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Corrupt {}: {e}, treating as empty", path.display());
            return Records::default();
        }
    };

    let mut records = Records::default();
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value(row.clone()) {
            Ok(item) => records.items.push(item),
            Err(e) => {
                warn!("Unreadable row {index} in {}: {e}, keeping it as is", path.display());
                records.unreadable.push(row);
            }
        }
    }

    records
}
