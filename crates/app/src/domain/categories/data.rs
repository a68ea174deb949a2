//! Categories Data

use thiserror::Error;

use crate::domain::{
    categories::records::CategoryUuid,
    validation::required_text,
};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub parent_uuid: Option<CategoryUuid>,
    pub name: String,
    pub description: Option<String>,
}

/// Category Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub parent_uuid: Option<CategoryUuid>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCategoryPath {
    #[error("category path must contain at least one name")]
    Empty,

    #[error("category path segment {0} is blank")]
    BlankSegment(usize),
}

/// Ordered category names from a root down to a leaf, e.g. `["Electronics", "Laptops"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    /// Build a path, trimming each segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the path is empty or any segment is blank.
    pub fn new<I, S>(segments: I) -> Result<Self, InvalidCategoryPath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                required_text(segment.as_ref()).ok_or(InvalidCategoryPath::BlankSegment(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if segments.is_empty() {
            return Err(InvalidCategoryPath::Empty);
        }

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}
