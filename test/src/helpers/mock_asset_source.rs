use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use meetup_shared::{model_path, AssetSource, FetchResult, LoadId};

/// Minimal model: a single triangle.
pub const TRIANGLE_MODEL: &str = r#"{"vertices":[0,0,0,1,0,0,0,1,0],"faces":[0,1,2]}"#;

/// Four-vertex model with one named material.
pub const VASE_MODEL: &str = r#"{
    "vertices": [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
    "faces": [0, 1, 2, 0, 2, 3],
    "materials": [{ "DbgName": "clay", "colorDiffuse": [0.6, 0.4, 0.2] }]
}"#;

struct Request {
    id: LoadId,
    path: String,
    ready_at: Instant,
}

/// In-memory asset source with a configurable latency per asset.
///
/// Unknown assets fail when their latency elapses, like a missing file would.
pub struct MockAssetSource {
    default_latency: Duration,
    latencies: HashMap<String, Duration>,
    files: HashMap<String, Vec<u8>>,
    requests: Vec<Request>,
}

impl MockAssetSource {
    pub fn new(default_latency: Duration) -> Self {
        Self {
            default_latency,
            latencies: HashMap::new(),
            files: HashMap::new(),
            requests: Vec::new(),
        }
    }

    /// Serves `vase` and `triangle`.
    pub fn with_fixtures(default_latency: Duration) -> Self {
        Self::new(default_latency)
            .with_asset("vase", VASE_MODEL)
            .with_asset("triangle", TRIANGLE_MODEL)
    }

    pub fn with_asset(mut self, name: &str, contents: &str) -> Self {
        self.files
            .insert(model_path(name), contents.as_bytes().to_vec());
        self
    }

    pub fn with_latency(mut self, name: &str, latency: Duration) -> Self {
        self.latencies.insert(model_path(name), latency);
        self
    }
}

impl AssetSource for MockAssetSource {
    fn request(&mut self, id: LoadId, path: &str, now: &Instant) {
        let latency = self
            .latencies
            .get(path)
            .copied()
            .unwrap_or(self.default_latency);
        self.requests.push(Request {
            id,
            path: path.to_string(),
            ready_at: *now + latency,
        });
    }

    fn poll(&mut self, now: &Instant) -> Vec<(LoadId, FetchResult)> {
        let (ready, waiting): (Vec<Request>, Vec<Request>) = std::mem::take(&mut self.requests)
            .into_iter()
            .partition(|request| request.ready_at <= *now);
        self.requests = waiting;

        ready
            .into_iter()
            .map(|request| {
                let result = self
                    .files
                    .get(&request.path)
                    .cloned()
                    .ok_or_else(|| format!("{} not found", request.path));
                (request.id, result)
            })
            .collect()
    }

    fn cancel(&mut self, id: LoadId) {
        self.requests.retain(|request| request.id != id);
    }
}
