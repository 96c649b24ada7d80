use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The category of a decode failure, without its payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    UnrecognizedLeaf,
    MalformedPosition,
    UnrecognizedGeometryType,
    MalformedCoordinates,
    UnrecognizedIdentifierType,
    MissingFeaturesField,
    MalformedFeatures,
    MalformedBoundingBox,
    ExpectedObject,
    InvalidProperties,
    NestingTooDeep,
    Json,
    Io,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON value is none of null, string, integer, double or boolean")]
    UnrecognizedLeaf,

    #[error("malformed position: {0}")]
    MalformedPosition(String),

    #[error("unrecognized geometry type: {0}")]
    UnrecognizedGeometryType(String),

    #[error("malformed coordinates for {geometry_type}: {reason}")]
    MalformedCoordinates {
        geometry_type: &'static str,
        reason: String,
    },

    #[error("feature id must be a string or an integer, found {0}")]
    UnrecognizedIdentifierType(&'static str),

    #[error("feature collection has no `features` field")]
    MissingFeaturesField,

    #[error("`features` must be an array, found {0}")]
    MalformedFeatures(&'static str),

    #[error("malformed bbox: {0}")]
    MalformedBoundingBox(String),

    #[error("{context} must be a JSON object, found {found}")]
    ExpectedObject {
        context: &'static str,
        found: &'static str,
    },

    #[error("invalid feature properties: {0}")]
    InvalidProperties(#[source] serde_json::Error),

    #[error("document nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnrecognizedLeaf => ErrorKind::UnrecognizedLeaf,
            Error::MalformedPosition(_) => ErrorKind::MalformedPosition,
            Error::UnrecognizedGeometryType(_) => ErrorKind::UnrecognizedGeometryType,
            Error::MalformedCoordinates { .. } => ErrorKind::MalformedCoordinates,
            Error::UnrecognizedIdentifierType(_) => ErrorKind::UnrecognizedIdentifierType,
            Error::MissingFeaturesField => ErrorKind::MissingFeaturesField,
            Error::MalformedFeatures(_) => ErrorKind::MalformedFeatures,
            Error::MalformedBoundingBox(_) => ErrorKind::MalformedBoundingBox,
            Error::ExpectedObject { .. } => ErrorKind::ExpectedObject,
            Error::InvalidProperties(_) => ErrorKind::InvalidProperties,
            Error::NestingTooDeep(_) => ErrorKind::NestingTooDeep,
            Error::Json(_) => ErrorKind::Json,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn expected_object(context: &'static str, found: &serde_json::Value) -> Self {
        Error::ExpectedObject {
            context,
            found: json_type_name(found),
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
