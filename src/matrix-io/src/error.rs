use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("bad input format: {0}")]
    BadInputFormat(String),

    #[error("failed to open {path}: {source}")]
    OpenFile { path: String, #[source] source: std::io::Error },

    #[error("csv error while reading {path}: {source}")]
    Csv { path: String, #[source] source: csv::Error },

    #[error("no input files provided")]
    NoInputFiles,

    #[error("header mismatch: {path} does not match the header of the first input file")]
    HeaderMismatch { path: String },

    #[error(transparent)]
    CallMatrix(#[from] callmatrix::CallMatrixError),
}

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("failed to create {path}: {source}")]
    CreateFile { path: String, #[source] source: std::io::Error },

    #[error("csv error while writing {path}: {source}")]
    Csv { path: String, #[source] source: csv::Error },
}
