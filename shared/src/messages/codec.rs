//! JSON wire format for [`Mutation`]s.
//!
//! A message is one flat object:
//!
//! ```json
//! {"version":1,"messageType":3,"modelHandle":"Box1","floatArrayData":[1.0,2.0,3.0],"stringData":null}
//! ```
//!
//! `version` and `kind` are optional. A message without `version` is read as version 1,
//! and an Add without `kind` takes its kind from the handle text. Unknown fields are
//! ignored, anything else that does not fit is rejected with [`DecodeError`].

use serde::{Deserialize, Serialize};

use crate::{
    messages::{
        constants::{ADD_TAG, PROTOCOL_VERSION, REMOVE_TAG, ROTATE_TAG, SCALE_TAG, TRANSLATE_TAG},
        error::{DecodeError, EncodeError},
        mutation::{Mutation, MutationKind, ObjectKind, ObjectSpec},
    },
    ObjectHandle, Vector3,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutgoingMessage<'a> {
    version: u32,
    message_type: u8,
    model_handle: &'a str,
    float_array_data: Option<&'a [f64; 3]>,
    string_data: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingMessage {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    message_type: Option<u8>,
    #[serde(default)]
    model_handle: Option<String>,
    #[serde(default)]
    float_array_data: Option<Vec<Option<f64>>>,
    #[serde(default)]
    string_data: Option<String>,
    #[serde(default)]
    kind: Option<String>,
}

/// Serializes a mutation into its wire representation.
pub fn encode(mutation: &Mutation) -> Result<Vec<u8>, EncodeError> {
    let operation = mutation.kind.name();
    let handle = mutation.handle.as_str();
    if handle.is_empty() {
        return Err(EncodeError::EmptyHandle { operation });
    }

    let (message_type, float_array_data, string_data, kind) = match &mutation.kind {
        MutationKind::Add(spec) => (ADD_TAG, None, Some(spec.payload()), Some(spec.kind().name())),
        MutationKind::Remove => (REMOVE_TAG, None, None, None),
        MutationKind::Translate(vector) => (TRANSLATE_TAG, Some(vector), None, None),
        MutationKind::Rotate(vector) => (ROTATE_TAG, Some(vector), None, None),
        MutationKind::Scale(vector) => (SCALE_TAG, Some(vector), None, None),
    };

    if let Some(vector) = float_array_data {
        if let Some(index) = vector.iter().position(|component| !component.is_finite()) {
            return Err(EncodeError::NonFiniteVector {
                handle: handle.to_string(),
                operation,
                index,
            });
        }
    }

    let message = OutgoingMessage {
        version: PROTOCOL_VERSION,
        message_type,
        model_handle: handle,
        float_array_data,
        string_data,
        kind,
    };

    serde_json::to_vec(&message).map_err(|error| EncodeError::Serialization {
        handle: handle.to_string(),
        reason: error.to_string(),
    })
}

/// Parses a wire message back into a [`Mutation`].
pub fn decode(bytes: &[u8]) -> Result<Mutation, DecodeError> {
    let message: IncomingMessage = serde_json::from_slice(bytes)
        .map_err(|error| DecodeError::malformed(error.to_string()))?;

    let version = message.version.unwrap_or(1);
    if version > PROTOCOL_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            version,
            supported: PROTOCOL_VERSION,
        });
    }

    let Some(message_type) = message.message_type else {
        return Err(DecodeError::malformed("missing messageType"));
    };

    let handle = match message.model_handle {
        Some(handle) if !handle.is_empty() => ObjectHandle::new(handle),
        Some(_) => return Err(DecodeError::malformed("modelHandle is empty")),
        None => return Err(DecodeError::malformed("missing modelHandle")),
    };

    let kind = match message_type {
        ADD_TAG => {
            let Some(payload) = message.string_data else {
                return Err(DecodeError::malformed(format!(
                    "add for {} is missing stringData",
                    handle
                )));
            };
            let object_kind = match message.kind.as_deref() {
                Some(name) => ObjectKind::from_name(name).ok_or_else(|| {
                    DecodeError::malformed(format!("unknown object kind '{}'", name))
                })?,
                None => ObjectKind::infer_from_handle(handle.as_str()).ok_or_else(|| {
                    DecodeError::malformed(format!(
                        "cannot infer object kind from handle {}",
                        handle
                    ))
                })?,
            };
            let spec = match object_kind {
                ObjectKind::Geometry(geometry) => ObjectSpec::primitive(geometry, payload),
                ObjectKind::Asset => ObjectSpec::asset(payload),
            };
            MutationKind::Add(spec)
        }
        REMOVE_TAG => MutationKind::Remove,
        TRANSLATE_TAG => MutationKind::Translate(read_vector(&handle, message.float_array_data)?),
        ROTATE_TAG => MutationKind::Rotate(read_vector(&handle, message.float_array_data)?),
        SCALE_TAG => MutationKind::Scale(read_vector(&handle, message.float_array_data)?),
        other => {
            return Err(DecodeError::malformed(format!(
                "unknown messageType {}",
                other
            )))
        }
    };

    Ok(Mutation { handle, kind })
}

fn read_vector(
    handle: &ObjectHandle,
    data: Option<Vec<Option<f64>>>,
) -> Result<Vector3, DecodeError> {
    let Some(data) = data else {
        return Err(DecodeError::malformed(format!(
            "transform for {} is missing floatArrayData",
            handle
        )));
    };
    let [x, y, z] = data.as_slice() else {
        return Err(DecodeError::malformed(format!(
            "floatArrayData for {} has {} components, expected 3",
            handle,
            data.len()
        )));
    };
    match (x, y, z) {
        (Some(x), Some(y), Some(z)) => Ok([*x, *y, *z]),
        _ => Err(DecodeError::malformed(format!(
            "floatArrayData for {} contains null",
            handle
        ))),
    }
}
