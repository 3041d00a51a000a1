use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use crate::{
    resolver::{
        asset_source::{model_path, AssetSource, LoadId},
        error::ResolveError,
        renderable::{AssetMesh, AssetModel, Color, GeometryParams, PrimitiveMesh, Renderable},
    },
    GeometryKind, ObjectHandle,
};

struct InFlightLoad {
    handle: ObjectHandle,
    asset_name: String,
    started: Instant,
}

/// A finished asynchronous load, delivered once per [`LoadId`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub id: LoadId,
    pub handle: ObjectHandle,
    pub result: Result<Renderable, ResolveError>,
}

/// Builds renderables from Add payloads.
///
/// Primitives are built on the spot. Assets are fetched through an [`AssetSource`] and
/// come back from [`ResourceResolver::poll`]; every load is single-shot, so a load that
/// was cancelled, timed out or already delivered never produces a second outcome.
pub struct ResourceResolver {
    source: Box<dyn AssetSource>,
    next_load_id: u64,
    in_flight: HashMap<LoadId, InFlightLoad>,
    load_timeout: Option<Duration>,
}

impl ResourceResolver {
    pub fn new(source: Box<dyn AssetSource>, load_timeout: Option<Duration>) -> Self {
        Self {
            source,
            next_load_id: 0,
            in_flight: HashMap::new(),
            load_timeout,
        }
    }

    /// Builds a primitive whose payload is its color.
    pub fn resolve_sync(
        &self,
        geometry: GeometryKind,
        payload: &str,
    ) -> Result<Renderable, ResolveError> {
        let color = Color::parse(payload)?;
        Ok(Renderable::Primitive(PrimitiveMesh {
            geometry,
            params: GeometryParams::for_kind(geometry),
            color,
        }))
    }

    /// Starts loading the asset named `asset_name` on behalf of `handle`.
    pub fn resolve_async(
        &mut self,
        handle: &ObjectHandle,
        asset_name: &str,
        now: &Instant,
    ) -> Result<LoadId, ResolveError> {
        validate_asset_name(asset_name)?;

        self.next_load_id += 1;
        let id = LoadId::from_u64(self.next_load_id);
        let path = model_path(asset_name);

        info!("Loading asset '{}' for {} ({})", asset_name, handle, id);
        self.in_flight.insert(
            id,
            InFlightLoad {
                handle: handle.clone(),
                asset_name: asset_name.to_string(),
                started: *now,
            },
        );
        self.source.request(id, &path, now);

        Ok(id)
    }

    /// Drops a load. Returns false if it had already finished or was never started.
    pub fn cancel(&mut self, id: LoadId) -> bool {
        let Some(load) = self.in_flight.remove(&id) else {
            return false;
        };
        debug!("Cancelled {} of '{}' for {}", id, load.asset_name, load.handle);
        self.source.cancel(id);
        true
    }

    pub fn is_loading(&self, id: LoadId) -> bool {
        self.in_flight.contains_key(&id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Collects finished loads, in the order the source finished them, followed by
    /// loads that exceeded the timeout.
    pub fn poll(&mut self, now: &Instant) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();

        for (id, fetched) in self.source.poll(now) {
            let Some(load) = self.in_flight.remove(&id) else {
                debug!("Discarding result of {}: no longer in flight", id);
                continue;
            };
            let result = match fetched {
                Ok(bytes) => AssetModel::parse(&load.asset_name, &bytes).map(|model| {
                    Renderable::Asset(AssetMesh {
                        name: load.asset_name.clone(),
                        model,
                    })
                }),
                Err(reason) => Err(ResolveError::LoadFailed {
                    asset: load.asset_name.clone(),
                    reason,
                }),
            };
            outcomes.push(LoadOutcome {
                id,
                handle: load.handle,
                result,
            });
        }

        if let Some(timeout) = self.load_timeout {
            let mut expired: Vec<LoadId> = self
                .in_flight
                .iter()
                .filter(|(_, load)| now.saturating_duration_since(load.started) >= timeout)
                .map(|(id, _)| *id)
                .collect();
            expired.sort();

            for id in expired {
                let Some(load) = self.in_flight.remove(&id) else {
                    continue;
                };
                warn!(
                    "Asset '{}' for {} timed out after {:?}",
                    load.asset_name, load.handle, timeout
                );
                self.source.cancel(id);
                outcomes.push(LoadOutcome {
                    id,
                    handle: load.handle,
                    result: Err(ResolveError::TimedOut {
                        asset: load.asset_name,
                        timeout,
                    }),
                });
            }
        }

        outcomes
    }
}

/// Asset names address a file under the model directory and may not escape it.
pub fn validate_asset_name(name: &str) -> Result<(), ResolveError> {
    let reason = if name.trim().is_empty() {
        "asset name is empty"
    } else if name.contains('/') || name.contains('\\') {
        "asset name contains a path separator"
    } else if name.contains("..") {
        "asset name contains '..'"
    } else if name.chars().any(char::is_control) {
        "asset name contains control characters"
    } else {
        return Ok(());
    };

    Err(ResolveError::InvalidPayload {
        kind: "asset",
        payload: name.to_string(),
        reason,
    })
}
