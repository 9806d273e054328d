use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MerkleError {
    #[error("no data provided")]
    EmptyInput,
    #[error("node not found")]
    NodeNotFound,
}
