//! Strips bulky relational fields from a metadata payload before it is written
//! as a sidecar.

use serde::Serialize;

use crate::api::VideoMetadata;

/// Fields removed from every exported payload.
pub const STRIPPED_FIELDS: [&str; 10] = [
    "timelineThumbnails",
    "tagVotes",
    "dislikedBy",
    "likedBy",
    "ratedBy",
    "musicVotes",
    "hlsVariants",
    "favoritedBy",
    "comments",
    "funScriptLikedBy",
];

/// Metadata with [`STRIPPED_FIELDS`] removed. The only form ever persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SanitizedMetadata(VideoMetadata);

impl SanitizedMetadata {
    /// UTF-8 JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(&self.0)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> VideoMetadata {
        self.0
    }
}

/// Everything else, nulls included, is kept in its received order.
pub fn sanitize(mut metadata: VideoMetadata) -> SanitizedMetadata {
    metadata.retain_fields(|field| !STRIPPED_FIELDS.contains(&field));
    SanitizedMetadata(metadata)
}
