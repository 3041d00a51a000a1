pub mod config;
pub mod deferred_queue;
pub mod error;
pub mod events;
pub mod mutation_dispatcher;
