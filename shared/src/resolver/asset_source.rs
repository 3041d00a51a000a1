use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Instant,
};

use log::debug;

/// Directory, relative to an asset root, that holds loadable models.
pub const MODEL_DIRECTORY: &str = "models";
/// File extension of loadable models.
pub const MODEL_EXTENSION: &str = "json";

/// Identifies one asynchronous asset load. Never reused within a resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(u64);

impl LoadId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// A completed fetch: raw asset bytes, or a reason the fetch failed.
pub type FetchResult = Result<Vec<u8>, String>;

/// Fetches asset bytes on behalf of the resource resolver.
///
/// Loads are cooperative: `request` starts a fetch and returns immediately, and finished
/// fetches are handed back by `poll`, which the resolver calls from the same thread that
/// processes mutations. Each requested id must be completed at most once.
pub trait AssetSource {
    /// Starts fetching `path` (e.g. `models/vase.json`).
    fn request(&mut self, id: LoadId, path: &str, now: &Instant);

    /// Returns every fetch that has finished by `now`.
    fn poll(&mut self, now: &Instant) -> Vec<(LoadId, FetchResult)>;

    /// Stops a fetch. Sources that cannot abort may ignore this; the resolver drops
    /// late results for cancelled ids regardless.
    fn cancel(&mut self, _id: LoadId) {}
}

/// Relative path of the model file backing `asset_name`.
pub fn model_path(asset_name: &str) -> String {
    format!("{}/{}.{}", MODEL_DIRECTORY, asset_name, MODEL_EXTENSION)
}

/// Reads models from a directory on disk.
///
/// This is a blocking convenience source for tools and tests: `request` only records
/// the path, and the file is read synchronously inside the next `poll`, on the thread
/// that drives the dispatcher. A renderer that must never stall on disk should supply
/// its own [`AssetSource`] that fetches in the background.
pub struct DirectoryAssetSource {
    root: PathBuf,
    requested: Vec<(LoadId, PathBuf)>,
}

impl DirectoryAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            requested: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssetSource {
    fn request(&mut self, id: LoadId, path: &str, _now: &Instant) {
        self.requested.push((id, self.root.join(path)));
    }

    fn poll(&mut self, _now: &Instant) -> Vec<(LoadId, FetchResult)> {
        std::mem::take(&mut self.requested)
            .into_iter()
            .map(|(id, full_path)| {
                debug!("Reading asset {} from {}", id, full_path.display());
                let result = fs::read(&full_path)
                    .map_err(|error| format!("{}: {}", full_path.display(), error));
                (id, result)
            })
            .collect()
    }

    fn cancel(&mut self, id: LoadId) {
        self.requested.retain(|(requested_id, _)| *requested_id != id);
    }
}
