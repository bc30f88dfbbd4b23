use crate::model::ImageId;
use lineage_graph::GraphError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Invalid history JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image {id} is not part of this history")]
    UnknownImage { id: ImageId },

    #[error("Image {duplicate} already belongs to another version than image {existing}")]
    ConflictingDuplicate {
        existing: ImageId,
        duplicate: ImageId,
    },
}
