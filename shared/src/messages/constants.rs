// Wire constants

/// Highest wire format version this build understands.
/// Messages without a `version` field are treated as version 1.
pub const PROTOCOL_VERSION: u32 = 1;

// `messageType` tags. Part of the wire format, never renumber.
pub const ADD_TAG: u8 = 1;
pub const REMOVE_TAG: u8 = 2;
pub const TRANSLATE_TAG: u8 = 3;
pub const ROTATE_TAG: u8 = 4;
pub const SCALE_TAG: u8 = 5;

