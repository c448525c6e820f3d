use stockroom_core::{DomainError, DomainResult};

use crate::label::{Category, CategoryId, Tag, TagId};

/// Owner of every category and tag known to an inventory.
///
/// Labels are kept in registration order. Names are unique per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRegistry {
    categories: Vec<Category>,
    tags: Vec<Tag>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new category.
    ///
    /// Fails with `AlreadyExists` if a category with the same name is known.
    pub fn register_category(&mut self, category: Category) -> DomainResult<CategoryId> {
        let id = category.id();
        if self.category(&id).is_some() {
            return Err(DomainError::already_exists(format!("category {id}")));
        }
        tracing::debug!(category = %id, "category registered");
        self.categories.push(category);
        Ok(id)
    }

    /// Register a category unless an identical one is already known.
    ///
    /// A known category with the same name but a different description is a
    /// conflict, since the two would diverge.
    pub fn intern_category(&mut self, category: Category) -> DomainResult<CategoryId> {
        match self.category(&category.id()) {
            Some(existing) if existing == &category => Ok(category.id()),
            Some(_) => Err(DomainError::already_exists(format!(
                "category {} with a different description",
                category.name()
            ))),
            None => self.register_category(category),
        }
    }

    /// Register a new tag.
    ///
    /// Fails with `AlreadyExists` if a tag with the same name is known.
    pub fn register_tag(&mut self, tag: Tag) -> DomainResult<TagId> {
        let id = tag.id();
        if self.tag(&id).is_some() {
            return Err(DomainError::already_exists(format!("tag {id}")));
        }
        tracing::debug!(tag = %id, "tag registered");
        self.tags.push(tag);
        Ok(id)
    }

    /// Register a tag unless it is already known.
    pub fn intern_tag(&mut self, tag: Tag) -> DomainResult<TagId> {
        let id = tag.id();
        if self.tag(&id).is_some() {
            return Ok(id);
        }
        self.register_tag(tag)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == id.as_str())
    }

    pub fn tag(&self, id: &TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name() == id.as_str())
    }

    /// Resolve a category id, failing with `NotFound` if it was never registered.
    pub fn require_category(&self, id: &CategoryId) -> DomainResult<&Category> {
        self.category(id)
            .ok_or_else(|| DomainError::not_found(format!("category {id}")))
    }

    /// Resolve a tag id, failing with `NotFound` if it was never registered.
    pub fn require_tag(&self, id: &TagId) -> DomainResult<&Tag> {
        self.tag(id)
            .ok_or_else(|| DomainError::not_found(format!("tag {id}")))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}
