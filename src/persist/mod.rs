//! Opaque key-value blob persistence over SQLite. A dedicated worker
//! thread owns the connection; writes are fire-and-forget and the worker
//! logs failures instead of surfacing them.

use std::{
    path::PathBuf,
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::oneshot;

pub const KEY_USERS: &str = "users";
pub const KEY_PROJECTS: &str = "projects";
pub const KEY_TASKS: &str = "tasks";
pub const KEY_POSTS: &str = "posts";
pub const KEY_SESSION: &str = "session";

type BlobTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum BlobCommand {
    Execute(BlobTask),
    Shutdown,
}

struct BlobStoreInner {
    sender: mpsc::Sender<BlobCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for BlobStoreInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(BlobCommand::Shutdown) {
                error!("Failed to send shutdown to blob store thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join blob store thread: {join_err:?}");
            }
        }
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
    .context("failed to create kv table")
}

#[derive(Clone)]
pub struct BlobStore {
    inner: Arc<BlobStoreInner>,
}

impl BlobStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create blob store directory {}", parent.display())
            })?;
        }

        let (command_tx, command_rx) = mpsc::channel::<BlobCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = path.clone();

        let worker = thread::Builder::new()
            .name("atelier-blobs".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow::Error::new(err)
                            .context("failed to open blob store database")));
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }

                if ready_tx.send(init_schema(&conn)).is_err() {
                    error!("Blob store initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        BlobCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        BlobCommand::Shutdown => break,
                    }
                }

                info!("Blob store thread shutting down");
            })
            .with_context(|| "failed to spawn blob store worker thread")?;

        ready_rx
            .recv()
            .context("blob store worker exited before signaling readiness")??;

        info!("Blob store initialized at {}", path.display());

        Ok(Self {
            inner: Arc::new(BlobStoreInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
        })
    }

    async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = BlobCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("Blob store caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to blob store thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("blob store thread terminated unexpectedly"))?
    }

    /// Queues a write without waiting for it. Failures are logged by the
    /// worker and otherwise invisible to the caller.
    fn submit<F>(&self, what: &'static str, task: F)
    where
        F: FnOnce(&mut Connection) -> Result<()> + Send + 'static,
    {
        let command = BlobCommand::Execute(Box::new(move |conn| {
            if let Err(err) = task(conn) {
                error!("Blob store write ({what}) failed: {err:#}");
            }
        }));

        if self.inner.sender.send(command).is_err() {
            error!("Blob store thread gone; dropped write ({what})");
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .context("failed to read blob")
        })
        .await
    }

    pub fn put(&self, key: &'static str, value: String) {
        self.submit(key, move |conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .with_context(|| format!("failed to upsert key {key}"))?;
            Ok(())
        });
    }

    pub fn remove(&self, key: &'static str) {
        self.submit(key, move |conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
                .with_context(|| format!("failed to delete key {key}"))?;
            Ok(())
        });
    }

    /// Writes several keys in one transaction; used for full snapshots so a
    /// crash never leaves the four collections torn across generations.
    pub fn put_all(&self, entries: Vec<(&'static str, String)>) {
        self.submit("snapshot", move |conn| {
            let tx = conn
                .transaction()
                .context("failed to open snapshot transaction")?;
            for (key, value) in entries {
                tx.execute(
                    "INSERT INTO kv (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    params![key, value],
                )
                .with_context(|| format!("failed to upsert key {key}"))?;
            }
            tx.commit().context("failed to commit snapshot")?;
            Ok(())
        });
    }

    /// Round-trips through the worker, so every previously queued write has
    /// been applied when this returns. Tests use it as a write barrier.
    pub async fn sync(&self) -> Result<()> {
        self.execute(|_conn| Ok(())).await
    }
}
