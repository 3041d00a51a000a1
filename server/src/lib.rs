//! # Meetup Server
//! A relay that rebroadcasts every message it receives, verbatim, to all connected
//! clients including the sender. It does not interpret messages, resolve conflicts
//! or remember anything, so a client that connects late starts from an empty scene.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod relay;

pub use relay::{ConnectionId, Relay, RelayConnection};
