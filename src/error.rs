use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("Parse error in {path}: {detail}")]
    ParseError { path: String, detail: String },
    #[error("Error serializing or deserializing json: {err}")]
    SerdeJson {
        #[from]
        err: serde_json::Error,
    },
    #[error("Data file not found: path={path}")]
    DatafileNotFound { path: String },
    #[error("Object not found: id={id}, collection={collection}, version={version}")]
    NotFound {
        id: String,
        collection: String,
        version: String,
    },
    #[error("Unsupported collection type: {collection_type}")]
    UnsupportedType { collection_type: String },
    #[error("{collection_type} object has no name: id={id}")]
    MissingName {
        collection_type: String,
        id: String,
    },
    #[error("LocalizationKey has no InvariantString or en field")]
    MissingDefaultString,
    #[error("Invalid version key (expected YYYY-MM-DD): {0}")]
    InvalidVersionKey(String),
    #[error("Virtual filesystem error: {0}")]
    Vfs(#[from] vfs::VfsError),
    #[error("IO error")]
    IoError(#[from] std::io::Error),
}

pub type IResult<T> = Result<T, ErrorKind>;
