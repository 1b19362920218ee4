pub mod account;

use std::{
    fs::{self, File, OpenOptions},
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Local};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        cage::{Cage, NewCage},
        id::{CageId, OwnerId, SnakeId, WindowId},
        store::{CageStore, Missing, Swap},
        window::{Claim, Window},
    },
    db::account::{NewSnake, Owner, Snake, normalize_email},
    ops::Stay,
    prelude::*,
    quantity::length::Meters,
};

/// Everything the application persists, as it is laid out in the TOML file.
#[derive(Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    owners: Vec<Owner>,

    #[serde(default)]
    snakes: Vec<Snake>,

    #[serde(default)]
    cages: Vec<Cage>,
}

impl Snapshot {
    fn cage_mut(&mut self, cage_id: CageId) -> Option<&mut Cage> {
        self.cages.iter_mut().find(|cage| cage.id == cage_id)
    }
}

/// Store of accounts, snakes and cages.
///
/// Operations within the process are serialized by the mutex. When backed by a file, they are
/// also serialized across processes by an OS lock on a sidecar `.lock` file: every operation
/// re-reads the file under that lock, and every mutation is written out before the lock is
/// released. A mutation that fails to be written is rolled back.
pub struct Db {
    path: Option<PathBuf>,
    snapshot: Mutex<Snapshot>,
}

/// Held OS lock on the sidecar file, released on drop.
struct FileLock(File);

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(error) = self.0.unlock() {
            warn!(%error, "failed to unlock the store");
        }
    }
}

#[derive(Copy, Clone)]
enum Access {
    Shared,
    Exclusive,
}

impl Db {
    #[must_use]
    pub fn in_memory() -> Self {
        Self { path: None, snapshot: Mutex::default() }
    }

    /// Open the file-backed store. A missing file means an empty store.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Self { path: Some(path.as_ref().to_path_buf()), snapshot: Mutex::default() };
        db.read(|snapshot| debug!(n_cages = snapshot.cages.len(), "opened"))?;
        Ok(db)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>> {
        self.snapshot.lock().map_err(|_| anyhow!("the store lock is poisoned"))
    }

    /// Take the OS lock and reload the snapshot from the file, if there is one.
    fn sync(&self, snapshot: &mut Snapshot, access: Access) -> Result<Option<FileLock>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let lock_path = path.with_extension("toml.lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("failed to open `{}`", lock_path.display()))?;
        let locked = match access {
            Access::Shared => file.lock_shared(),
            Access::Exclusive => file.lock(),
        };
        locked.with_context(|| format!("failed to lock `{}`", lock_path.display()))?;
        let file_lock = FileLock(file);

        *snapshot = match fs::read(path) {
            Ok(contents) => toml::from_slice(&contents)
                .with_context(|| format!("failed to parse `{}`", path.display()))?,
            Err(error) if error.kind() == ErrorKind::NotFound => Snapshot::default(),
            Err(error) => {
                return Err(error).with_context(|| format!("failed to read `{}`", path.display()));
            }
        };
        Ok(Some(file_lock))
    }

    fn flush(&self, snapshot: &Snapshot) -> Result {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let temporary_path = path.with_extension("toml.tmp");
        fs::write(&temporary_path, toml::to_string(snapshot)?)
            .with_context(|| format!("failed to write `{}`", temporary_path.display()))?;
        fs::rename(&temporary_path, path)
            .with_context(|| format!("failed to replace `{}`", path.display()))?;
        debug!(path = %path.display(), "flushed");
        Ok(())
    }

    /// Look into the up-to-date snapshot.
    fn read<T>(&self, inspect: impl FnOnce(&Snapshot) -> T) -> Result<T> {
        let mut snapshot = self.lock()?;
        let _file_lock = self.sync(&mut *snapshot, Access::Shared)?;
        Ok(inspect(&*snapshot))
    }

    /// Apply the mutation to the up-to-date snapshot and persist it, all under both locks.
    ///
    /// Either the mutation is applied and persisted, or the snapshot is left as it was.
    fn transact<T>(&self, mutate: impl FnOnce(&mut Snapshot) -> Result<T>) -> Result<T> {
        let mut snapshot = self.lock()?;
        let _file_lock = self.sync(&mut *snapshot, Access::Exclusive)?;
        let backup = snapshot.clone();
        let result = mutate(&mut *snapshot).and_then(|value| {
            self.flush(&*snapshot)?;
            Ok(value)
        });
        if result.is_err() {
            *snapshot = backup;
        }
        result
    }

    #[instrument(skip_all, fields(email = email))]
    pub fn create_account(&self, name: &str, email: &str) -> Result<Owner> {
        let email = normalize_email(email);
        let owner = self.transact(|snapshot| {
            ensure!(
                snapshot.owners.iter().all(|owner| owner.email != email),
                "account with email `{email}` already exists"
            );
            let owner = Owner {
                id: OwnerId(snapshot.owners.len() as u64 + 1),
                name: name.trim().to_string(),
                email: email.clone(),
            };
            snapshot.owners.push(owner.clone());
            Ok(owner)
        })?;
        info!(id = %owner.id, "created account");
        Ok(owner)
    }

    pub fn find_account_by_email(&self, email: &str) -> Result<Option<Owner>> {
        let email = normalize_email(email);
        self.read(|snapshot| snapshot.owners.iter().find(|owner| owner.email == email).cloned())
    }

    #[instrument(skip_all, fields(owner_id = %snake.owner_id, name = %snake.name))]
    pub fn add_snake(&self, snake: NewSnake) -> Result<Snake> {
        ensure!(snake.length > Meters::ZERO, "snake length must be positive");
        let snake = self.transact(|snapshot| {
            let snake = Snake::new(SnakeId(snapshot.snakes.len() as u64 + 1), snake);
            snapshot.snakes.push(snake.clone());
            Ok(snake)
        })?;
        info!(id = %snake.id, "added snake");
        Ok(snake)
    }

    /// Snakes of the owner in registration order.
    pub fn snakes_of(&self, owner_id: OwnerId) -> Result<Vec<Snake>> {
        self.read(|snapshot| {
            snapshot.snakes.iter().filter(|snake| snake.owner_id == owner_id).cloned().collect()
        })
    }
}

impl CageStore for Db {
    fn load_all(&self) -> Result<Vec<Cage>> {
        self.read(|snapshot| snapshot.cages.iter().sorted_by_key(|cage| cage.id).cloned().collect())
    }

    fn load(&self, cage_id: CageId) -> Result<Option<Cage>> {
        self.read(|snapshot| snapshot.cages.iter().find(|cage| cage.id == cage_id).cloned())
    }

    fn insert(&self, cage: NewCage) -> Result<Cage> {
        self.transact(|snapshot| {
            let cage = Cage::new(CageId(snapshot.cages.len() as u64 + 1), cage);
            snapshot.cages.push(cage.clone());
            Ok(cage)
        })
    }

    fn append_window(
        &self,
        cage_id: CageId,
        stay: Stay,
        published_at: DateTime<Local>,
    ) -> Result<Option<Window>> {
        self.transact(|snapshot| {
            let Some(cage) = snapshot.cage_mut(cage_id) else {
                return Ok(None);
            };
            let window = Window::open(cage.next_window_id(), stay, published_at);
            cage.windows.push(window.clone());
            Ok(Some(window))
        })
    }

    fn compare_and_swap(&self, cage_id: CageId, window_id: WindowId, claim: Claim) -> Result<Swap> {
        self.transact(|snapshot| {
            let Some(cage) = snapshot.cage_mut(cage_id) else {
                return Ok(Swap::Missing(Missing::Cage(cage_id)));
            };
            let Some(window) = cage.window_mut(window_id) else {
                return Ok(Swap::Missing(Missing::Window(cage_id, window_id)));
            };
            match window.try_claim(claim) {
                Ok(_) => Ok(Swap::Swapped(cage.clone())),
                Err(existing) => Ok(Swap::Claimed(existing)),
            }
        })
    }
}
