//! Translation between local numeric ids and the catalog's opaque global ids
//! (`base64("<Type>:<id>")`).

use std::fmt::Display;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const CATEGORY_TYPE: &str = "Category";

pub fn graphql_id_from_db_id(db_id: impl Display, type_name: &str) -> String {
    STANDARD.encode(format!("{}:{}", type_name, db_id))
}

#[derive(Debug)]
pub enum GraphQlIdError {
    DecodeError(base64::DecodeError),
    NotUtf8,
    WrongType { expected: String, found: String },
    Malformed(String),
}

impl Display for GraphQlIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecodeError(err) => write!(f, "Failed to decode base64: {}", err),
            Self::NotUtf8 => write!(f, "Global id is not valid UTF-8"),
            Self::WrongType { expected, found } => {
                write!(f, "Expected a {} id, found a {} id", expected, found)
            }
            Self::Malformed(id) => write!(f, "Malformed global id: {}", id),
        }
    }
}

impl std::error::Error for GraphQlIdError {}

/// Recover the local id from a global id of type `type_name`.
pub fn db_id_from_graphql_id(global_id: &str, type_name: &str) -> Result<String, GraphQlIdError> {
    let decoded = STANDARD
        .decode(global_id.as_bytes())
        .map_err(GraphQlIdError::DecodeError)?;
    let decoded = String::from_utf8(decoded).map_err(|_| GraphQlIdError::NotUtf8)?;
    let Some((found, db_id)) = decoded.split_once(':') else {
        return Err(GraphQlIdError::Malformed(decoded));
    };
    if found != type_name {
        return Err(GraphQlIdError::WrongType { expected: type_name.to_string(), found: found.to_string() });
    }
    Ok(db_id.to_string())
}
