//! Directive catalog - the registry of every directive a deployment knows
//!
//! The catalog is an index-addressed table. Each name owns one slot for the
//! catalog's lifetime; registering a name again overwrites the slot in place
//! (last writer wins) so keys already handed out keep pointing at it.

use std::collections::HashMap;

use crate::{Directive, DirectiveError, DirectiveId, DirectiveKey, DirectiveResult, Priority};

/// Registry of directives, populated during setup
#[derive(Clone, Debug, Default)]
pub struct DirectiveCatalog {
    /// Directive table indexed by key
    directives: Vec<Directive>,
    /// Name to slot index
    index: HashMap<DirectiveId, DirectiveKey>,
}

impl DirectiveCatalog {
    pub fn new() -> Self {
        DirectiveCatalog::default()
    }

    /// Build a catalog from a list of definitions.
    ///
    /// Unlike `register`, this rejects empty names and names defined twice,
    /// since a definition list comes from configuration.
    pub fn from_directives<I>(directives: I) -> DirectiveResult<Self>
    where
        I: IntoIterator<Item = Directive>,
    {
        let mut catalog = DirectiveCatalog::new();
        for directive in directives {
            if directive.id.is_empty() {
                return Err(DirectiveError::EmptyName);
            }
            if catalog.contains(directive.id.as_str()) {
                return Err(DirectiveError::DuplicateDirective(directive.id));
            }
            catalog.insert(directive);
        }
        Ok(catalog)
    }

    /// Catalog holding the stock installation directives
    pub fn with_defaults() -> Self {
        let mut catalog = DirectiveCatalog::new();
        for directive in Directive::defaults() {
            catalog.insert(directive);
        }
        catalog
    }

    /// Register a directive, overwriting any previous entry with the same name
    pub fn register(
        &mut self,
        id: impl Into<DirectiveId>,
        label: impl Into<String>,
        priority: impl Into<Priority>,
    ) -> DirectiveKey {
        self.insert(Directive::new(id, label, priority))
    }

    /// Insert a directive value, overwriting any previous entry with the same name
    pub fn insert(&mut self, directive: Directive) -> DirectiveKey {
        if let Some(&key) = self.index.get(directive.id.as_str()) {
            self.directives[key.index()] = directive;
            return key;
        }

        let key = DirectiveKey(self.directives.len() as u32);
        self.index.insert(directive.id.clone(), key);
        self.directives.push(directive);
        key
    }

    /// Look up a directive by name
    pub fn lookup(&self, id: &str) -> Option<&Directive> {
        self.key_of(id).and_then(|key| self.get(key))
    }

    /// Resolve a name to its table slot
    #[inline]
    pub fn key_of(&self, id: &str) -> Option<DirectiveKey> {
        self.index.get(id).copied()
    }

    /// Resolve a name, failing if it was never registered
    pub fn require(&self, id: &str) -> DirectiveResult<DirectiveKey> {
        self.key_of(id)
            .ok_or_else(|| DirectiveError::UnknownDirective(DirectiveId::new(id)))
    }

    /// Get a directive by key
    #[inline]
    pub fn get(&self, key: DirectiveKey) -> Option<&Directive> {
        self.directives.get(key.index())
    }

    /// Check if a name is registered
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get number of directives
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Iterate over directives in registration order
    pub fn iter(&self) -> impl Iterator<Item = (DirectiveKey, &Directive)> {
        self.directives
            .iter()
            .enumerate()
            .map(|(i, d)| (DirectiveKey(i as u32), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names;

    #[test]
    fn test_register_and_lookup() {
        let mut catalog = DirectiveCatalog::new();
        let key = catalog.register("no_user", "Is anyone there?", 1);

        let directive = catalog.lookup("no_user").unwrap();
        assert_eq!(directive.label, "Is anyone there?");
        assert_eq!(directive.priority, Priority::new(1));
        assert_eq!(catalog.key_of("no_user"), Some(key));
        assert!(catalog.lookup("too_many_users").is_none());
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut catalog = DirectiveCatalog::new();
        let first = catalog.register("gate", "Drop a video", 10);
        catalog.register("other", "Other", 1);
        let second = catalog.register("gate", "Drop a clip", 5);

        assert_eq!(first, second);
        assert_eq!(catalog.len(), 2);

        let directive = catalog.get(first).unwrap();
        assert_eq!(directive.label, "Drop a clip");
        assert_eq!(directive.priority, Priority::new(5));
    }

    #[test]
    fn test_require_unknown() {
        let catalog = DirectiveCatalog::with_defaults();
        assert!(catalog.require(names::NO_USER).is_ok());
        assert_eq!(
            catalog.require("missing"),
            Err(DirectiveError::UnknownDirective(DirectiveId::new("missing")))
        );
    }

    #[test]
    fn test_from_directives_rejects_duplicates() {
        let result = DirectiveCatalog::from_directives(vec![
            Directive::new("a", "A", 1),
            Directive::new("a", "A again", 2),
        ]);
        assert_eq!(
            result.unwrap_err(),
            DirectiveError::DuplicateDirective(DirectiveId::new("a"))
        );

        let result = DirectiveCatalog::from_directives(vec![Directive::new("", "blank", 1)]);
        assert_eq!(result.unwrap_err(), DirectiveError::EmptyName);
    }

    #[test]
    fn test_iter_in_registration_order() {
        let catalog = DirectiveCatalog::with_defaults();
        let ids: Vec<_> = catalog.iter().map(|(_, d)| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                names::NO_BACKGROUND_VIDEO,
                names::NO_FOREGROUND_VIDEO,
                names::NO_USER,
                names::TOO_MANY_USERS,
            ]
        );
    }
}
