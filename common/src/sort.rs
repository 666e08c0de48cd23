//! Sort tokens (`price`, `-name`, ...) and their normalised form.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Prefix marking a descending sort token.
pub const DESCENDING_PREFIX: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "NAME")]
    Name,
    #[serde(rename = "MINIMAL_PRICE")]
    Price,
    #[serde(rename = "DATE")]
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Name, SortField::Price, SortField::UpdatedAt];

    /// Field name as it appears in a sort token.
    pub fn token(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::UpdatedAt => "updated_at",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.token() == token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: OrderDirection,
}

impl Default for SortSpec {
    /// Most recently updated, ascending.
    fn default() -> Self {
        Self { field: SortField::UpdatedAt, direction: OrderDirection::Asc }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    Empty,
    InvalidSortField(String),
}

impl Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty sort token"),
            Self::InvalidSortField(token) => write!(f, "Invalid sort field: {:?}", token),
        }
    }
}

impl std::error::Error for SortError {}

/// Normalise a raw sort token: a leading `-` selects descending order, the
/// remainder must be one of the sortable fields.
pub fn normalize_sort(token: &str) -> Result<SortSpec, SortError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SortError::Empty);
    }
    let (direction, field_token) = match token.strip_prefix(DESCENDING_PREFIX) {
        Some(rest) => (OrderDirection::Desc, rest),
        None => (OrderDirection::Asc, token),
    };
    let field = SortField::from_token(field_token)
        .ok_or_else(|| SortError::InvalidSortField(token.to_string()))?;
    Ok(SortSpec { field, direction })
}

impl SortSpec {
    /// Normalise an optional token, falling back to the default order on any
    /// error.
    pub fn resolve(token: Option<&str>) -> Self {
        token.and_then(|t| normalize_sort(t).ok()).unwrap_or_default()
    }

    pub fn token(&self) -> String {
        match self.direction {
            OrderDirection::Asc => self.field.token().to_string(),
            OrderDirection::Desc => format!("{}{}", DESCENDING_PREFIX, self.field.token()),
        }
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Entry of the sort menu shown above a product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub label: &'static str,
    pub value: Option<&'static str>,
}

pub const SORT_OPTIONS: [SortOption; 7] = [
    SortOption { label: "Clear...", value: None },
    SortOption { label: "Price Low-High", value: Some("price") },
    SortOption { label: "Price High-Low", value: Some("-price") },
    SortOption { label: "Name Increasing", value: Some("name") },
    SortOption { label: "Name Decreasing", value: Some("-name") },
    SortOption { label: "Last updated Ascending", value: Some("updated_at") },
    SortOption { label: "Last updated Descending", value: Some("-updated_at") },
];

/// Label of the sort option matching `token`, if any.
pub fn sort_option_label(token: Option<&str>) -> Option<&'static str> {
    SORT_OPTIONS.iter().find(|option| option.value == token).map(|option| option.label)
}
