use std::io;

use thiserror::Error;

use crate::grid::MIN_SIZE;

#[derive(Error, Debug, PartialEq)]
#[error("unsupported grid size: {size} (must be at least {})", MIN_SIZE)]
pub struct UnsupportedSize {
    pub size: usize,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseGridError {
    #[error("row {row} has {len} cells but the grid has {rows} rows")]
    NonSquare { rows: usize, row: usize, len: usize },
    #[error("invalid cell token \"{token}\" at ({row}, {col})")]
    InvalidToken {
        token: String,
        row: usize,
        col: usize,
    },
    #[error(transparent)]
    UnsupportedSize(#[from] UnsupportedSize),
}

#[derive(Error, Debug)]
#[error("unknown shape \"{0}\"")]
pub struct UnknownShape(pub(crate) String);

#[derive(Error, Debug)]
pub enum LevelsFromFileError {
    #[error("error reading levels file")]
    Io(#[from] io::Error),
    #[error("error parsing levels file")]
    Json(#[from] serde_json::Error),
}
