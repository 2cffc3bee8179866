//! Normalizing binary payloads (raw bytes or blobs) into byte buffers.
//!
//! Raw bytes are handed back synchronously. Blobs are read asynchronously and
//! the callback runs whenever the read completes; there is no cancellation.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

/// Completion event of a blob read. `result` is `None` for a malformed
/// event that carries no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEvent {
    pub result: Option<Vec<u8>>,
}

/// Handler invoked once a blob read completes.
pub type LoadHandler = Box<dyn FnOnce(LoadEvent) + Send>;

/// Something that can be read into bytes asynchronously.
pub trait BlobSource: Send + Sync {
    /// Start the read and return immediately; `on_load` runs on completion.
    fn read_to_bytes(&self, on_load: LoadHandler);
}

/// A binary payload as received from a caller.
#[derive(Clone)]
pub enum BinaryData {
    /// Already-materialized bytes.
    Raw(Vec<u8>),
    /// A blob that still has to be read.
    Blob(Arc<dyn BlobSource>),
}

impl std::fmt::Debug for BinaryData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryData::Raw(bytes) => write!(f, "Raw({} bytes)", bytes.len()),
            BinaryData::Blob(_) => f.write_str("Blob"),
        }
    }
}

/// Deliver `data` as a byte buffer to `callback`.
///
/// - `None`: nothing happens and `callback` is dropped uncalled.
/// - `Raw`: `callback` runs synchronously with the bytes unchanged.
/// - `Blob`: the read is started and `callback` runs when it completes,
///   unless the completion event carries no result.
pub fn to_array_buffer<F>(data: Option<BinaryData>, callback: F)
where
    F: FnOnce(Vec<u8>) + Send + 'static,
{
    match data {
        None => {}
        Some(BinaryData::Raw(bytes)) => callback(bytes),
        Some(BinaryData::Blob(blob)) => blob.read_to_bytes(Box::new(move |event| {
            match event.result {
                Some(bytes) => callback(bytes),
                None => tracing::debug!("Blob load event without result, dropping"),
            }
        })),
    }
}

/// Blob backed by a file, read on a worker thread.
#[derive(Debug, Clone)]
pub struct FileBlob {
    path: PathBuf,
}

impl FileBlob {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BlobSource for FileBlob {
    fn read_to_bytes(&self, on_load: LoadHandler) {
        let path = self.path.clone();
        let spawned = thread::Builder::new()
            .name("blob-reader".to_string())
            .spawn(move || {
                let result = match fs::read(&path) {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        tracing::warn!("Failed to read blob {:?}: {}", path, e);
                        None
                    }
                };
                on_load(LoadEvent { result });
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn blob reader thread: {}", e);
        }
    }
}

type Task = Box<dyn FnOnce() + Send>;

/// Minimal single-threaded event loop: tasks queue up and run on
/// [`EventQueue::run_pending`].
#[derive(Default)]
pub struct EventQueue {
    tasks: Mutex<VecDeque<Task>>,
}

impl EventQueue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn post(&self, task: Task) {
        self.tasks.lock().push_back(task);
    }

    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run queued tasks, including ones posted while running. Returns the
    /// number of tasks run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Pop outside the task call so tasks may post more work.
            let next = self.tasks.lock().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

/// In-memory blob whose completion is delivered through an [`EventQueue`].
pub struct MemoryBlob {
    data: Option<Vec<u8>>,
    queue: Arc<EventQueue>,
}

impl MemoryBlob {
    pub fn new(data: impl Into<Vec<u8>>, queue: Arc<EventQueue>) -> Self {
        Self {
            data: Some(data.into()),
            queue,
        }
    }

    /// A blob whose load event arrives without a result.
    pub fn malformed(queue: Arc<EventQueue>) -> Self {
        Self { data: None, queue }
    }
}

impl BlobSource for MemoryBlob {
    fn read_to_bytes(&self, on_load: LoadHandler) {
        let result = self.data.clone();
        self.queue.post(Box::new(move || on_load(LoadEvent { result })));
    }
}
