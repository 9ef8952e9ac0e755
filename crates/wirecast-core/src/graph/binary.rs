//! Binary serialization for type graphs using postcard.

use super::json::GraphError;
use super::types::TypeGraph;

impl TypeGraph {
    /// Deserialize a graph from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GraphError> {
        postcard::from_bytes(bytes).map_err(GraphError::Binary)
    }

    /// Serialize a graph to binary format.
    pub fn to_binary(&self) -> Result<Vec<u8>, GraphError> {
        postcard::to_allocvec(self).map_err(GraphError::Binary)
    }
}
