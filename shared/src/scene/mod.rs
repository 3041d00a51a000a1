pub mod error;
pub mod object_record;
pub mod object_registry;
