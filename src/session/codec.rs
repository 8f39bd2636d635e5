//! Scene serialization.
//!
//! A scene is persisted as a bare JSON array of elements, stored in the
//! note's `content` string.

use crate::draw::{Element, Frame};
use crate::util::backfill_id;
use log::{debug, warn};
use thiserror::Error;

/// Errors converting between a scene and its stored form.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("drawing content is not a valid element list: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to serialise drawing: {0}")]
    Encode(#[source] serde_json::Error),

    /// JSON has no representation for NaN or infinity.
    #[error("element '{0}' has non-finite coordinates")]
    NonFinite(String),
}

/// Serializes `frame` as a JSON array, every field kept as is.
///
/// Refuses scenes holding a non-finite number, which would otherwise be
/// written as `null`.
pub fn encode_scene(frame: &Frame) -> Result<String, CodecError> {
    if let Some(element) = frame.iter().find(|element| !element.is_finite()) {
        return Err(CodecError::NonFinite(element.id.clone()));
    }
    serde_json::to_string(frame).map_err(CodecError::Encode)
}

/// Parses stored content into a scene.
///
/// Empty or whitespace-only content is an empty scene. Elements without an
/// id receive `el-<index>-<load_millis>`.
pub fn decode_scene(content: &str, load_millis: i64) -> Result<Frame, CodecError> {
    if content.trim().is_empty() {
        debug!("Empty drawing content; starting with an empty scene");
        return Ok(Frame::new());
    }

    let elements: Vec<Element> = serde_json::from_str(content).map_err(CodecError::Malformed)?;
    let mut frame = Frame::from_elements(elements);

    let backfilled = backfill_ids(&mut frame, load_millis);
    if backfilled > 0 {
        debug!("Assigned ids to {backfilled} elements");
    }

    for element in frame.iter().filter(|element| !element.is_finite()) {
        warn!(
            "Element {} has non-finite coordinates; keeping it as stored",
            element.id
        );
    }

    Ok(frame)
}

/// Gives every element with a missing or empty id a synthetic one.
/// Returns how many ids were assigned.
pub fn backfill_ids(frame: &mut Frame, load_millis: i64) -> usize {
    let mut assigned = 0;
    for (index, element) in frame.elements.iter_mut().enumerate() {
        if element.id.is_empty() {
            element.id = backfill_id(index, load_millis);
            assigned += 1;
        }
    }
    assigned
}
