use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ValueObject};

/// Category identifier: categories are identified by name.
///
/// Only obtainable from a validated [`Category`] through [`Category::id`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

/// Tag identifier: tags are identified by name.
///
/// Only obtainable from a validated [`Tag`] through [`Tag::id`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TagId(String);

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TagId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::fmt::Display for TagId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

fn label_name(name: String, kind: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{kind} name cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Descriptive product category, e.g. `Electronics` ("Devices and gadgets").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCategory")]
pub struct Category {
    name: String,
    description: String,
}

#[derive(Deserialize)]
struct RawCategory {
    name: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<RawCategory> for Category {
    type Error = DomainError;

    fn try_from(raw: RawCategory) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.description)
    }
}

impl Category {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            name: label_name(name.into(), "category")?,
            description: description.into(),
        })
    }

    pub fn id(&self) -> CategoryId {
        CategoryId(self.name.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl ValueObject for Category {}

/// Free-form product tag, e.g. `On Sale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTag")]
pub struct Tag {
    name: String,
}

#[derive(Deserialize)]
struct RawTag {
    name: String,
}

impl TryFrom<RawTag> for Tag {
    type Error = DomainError;

    fn try_from(raw: RawTag) -> Result<Self, Self::Error> {
        Self::new(raw.name)
    }
}

impl Tag {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            name: label_name(name.into(), "tag")?,
        })
    }

    pub fn id(&self) -> TagId {
        TagId(self.name.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ValueObject for Tag {}
