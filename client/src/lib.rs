//! # Meetup Client
//! Sends scene mutations to the relay and applies every mutation the relay echoes
//! back, including this client's own, to a local scene registry.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod client;
mod client_config;
mod handle_generator;

pub use client::SceneClient;
pub use client_config::ClientConfig;
pub use handle_generator::HandleGenerator;

pub use meetup_shared::{
    AssetSource, DirectoryAssetSource, DuplicateAddPolicy, GeometryKind, Mutation, ObjectHandle,
    ObjectKind, ObjectRegistry, ObjectSpec, SceneEvent, SceneObjectRecord, SyncConfig, SyncError,
    Transport, TransportError, Vector3,
};
