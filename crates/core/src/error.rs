use story_assets::AssetError;

/// Errors raised while decoding a story from its wire representation.
///
/// Every variant is fatal for the whole decode: no partially built story is ever returned.
/// Field paths use the wire names, for example `contents[2].assetName`.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("story schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("unknown content type '{value}' at `{field}`")]
    UnknownContentType { field: String, value: String },

    #[error("asset '{name}' referenced by `{field}` was not found")]
    AssetNotFound { field: String, name: String },

    #[error("failed to resolve asset: {0}")]
    Asset(AssetError),

    #[error("story at index {index} failed to decode: {source}")]
    InList {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors raised by the seen-state tracker and its flag stores.
#[derive(Debug, thiserror::Error)]
pub enum SeenError {
    #[error("failed to read seen-state store: {0}")]
    StoreRead(std::io::Error),
    #[error("failed to write seen-state store: {0}")]
    StoreWrite(std::io::Error),
    #[error("failed to serialize seen-state store: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize seen-state store: {0}")]
    Deserialization(serde_json::Error),
}

pub type SeenResult<T> = std::result::Result<T, SeenError>;

/// Errors raised while wiring up core services from configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("seen-state error: {0}")]
    Seen(#[from] SeenError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
