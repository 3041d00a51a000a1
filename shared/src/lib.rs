//! # Meetup Shared
//! Scene synchronization core used by meetup clients: the mutation wire codec, the
//! object registry, the resource resolver and the mutation dispatcher that ties them
//! together.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod dispatcher;
mod messages;
mod resolver;
mod scene;
mod transport;
mod types;

pub use dispatcher::{
    config::{DuplicateAddPolicy, SyncConfig},
    deferred_queue::{DeferredMutation, DeferredQueue},
    error::SyncError,
    events::{SceneEvent, SceneEvents},
    mutation_dispatcher::{DispatchOutcome, MutationDispatcher},
};
pub use messages::{
    codec::{decode, encode},
    constants::PROTOCOL_VERSION,
    error::{DecodeError, EncodeError},
    mutation::{
        GeometryKind, Mutation, MutationKind, ObjectKind, ObjectSpec, TransformChannel,
    },
};
pub use resolver::{
    asset_source::{model_path, AssetSource, DirectoryAssetSource, FetchResult, LoadId},
    error::ResolveError,
    renderable::{
        AssetMaterial, AssetMesh, AssetModel, Color, GeometryParams, PrimitiveMesh, Renderable,
    },
    resource_resolver::{validate_asset_name, LoadOutcome, ResourceResolver},
};
pub use scene::{
    error::RegistryError,
    object_record::{RenderState, SceneObjectRecord, Transform},
    object_registry::ObjectRegistry,
};
pub use transport::{error::TransportError, Transport};
pub use types::{ObjectHandle, Vector3};
