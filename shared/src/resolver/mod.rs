pub mod asset_source;
pub mod error;
pub mod renderable;
pub mod resource_resolver;
