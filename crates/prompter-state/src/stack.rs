//! Directive stack - the ordered set of currently asserted directives
//!
//! INVARIANTS (hold after every mutation):
//! - a directive appears at most once
//! - entries are sorted by non-decreasing priority, front to back
//! - the back entry, if any, is the active directive
//!
//! Insertion scans from the front and stops at the first entry whose
//! priority is greater than or equal to the new one. A new directive is
//! therefore placed *before* existing entries of equal priority, which keeps
//! the earliest-pushed directive of a priority band active until it is
//! removed. This ordering is observable and must not be replaced with a
//! different sort.

use prompter_core::{Directive, DirectiveCatalog, DirectiveKey, Priority};
use tracing::{debug, trace};

/// A stack slot: which directive, and the priority it was pushed with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackEntry {
    pub key: DirectiveKey,
    pub priority: Priority,
}

/// Priority-ordered, de-duplicated stack of directive keys.
///
/// The stack never owns directives; it records catalog keys. Operations that
/// take a name resolve it through the catalog passed in.
#[derive(Clone, Debug, Default)]
pub struct DirectiveStack {
    /// Front = least prominent, back = active
    entries: Vec<StackEntry>,
}

impl DirectiveStack {
    pub fn new() -> Self {
        DirectiveStack::default()
    }

    /// Assert a directive by name.
    ///
    /// Names missing from the catalog are ignored: the stack is left as is
    /// and `false` is returned. Re-asserting a present directive moves it to
    /// the position a fresh push would give it.
    pub fn push(&mut self, catalog: &DirectiveCatalog, id: &str) -> bool {
        match catalog.key_of(id) {
            Some(key) => self.push_key(catalog, key),
            None => {
                trace!(directive = id, "push ignored: directive not in catalog");
                false
            }
        }
    }

    /// Assert a directive by catalog key
    pub fn push_key(&mut self, catalog: &DirectiveCatalog, key: DirectiveKey) -> bool {
        let Some(directive) = catalog.get(key) else {
            trace!(?key, "push ignored: key not in catalog");
            return false;
        };

        self.remove_key(key);

        let priority = directive.priority;
        let mut position = 0;
        while position < self.entries.len() && self.entries[position].priority < priority {
            position += 1;
        }
        self.entries.insert(position, StackEntry { key, priority });

        debug!(
            directive = %directive.id,
            priority = priority.value(),
            position,
            depth = self.entries.len(),
            "directive pushed"
        );
        debug_assert!(self.is_well_formed());
        true
    }

    /// Remove a directive by name. No-op if absent or unknown.
    pub fn remove(&mut self, catalog: &DirectiveCatalog, id: &str) -> bool {
        catalog.key_of(id).is_some_and(|key| self.remove_key(key))
    }

    /// Remove a directive by key. No-op if absent.
    pub fn remove_key(&mut self, key: DirectiveKey) -> bool {
        match self.entries.iter().position(|e| e.key == key) {
            Some(index) => {
                self.entries.remove(index);
                trace!(?key, depth = self.entries.len(), "directive removed");
                true
            }
            None => false,
        }
    }

    /// Remove and return the active directive
    pub fn pop_top(&mut self) -> Option<DirectiveKey> {
        let entry = self.entries.pop()?;
        trace!(key = ?entry.key, depth = self.entries.len(), "active directive popped");
        Some(entry.key)
    }

    /// Key of the active directive
    #[inline]
    pub fn top(&self) -> Option<DirectiveKey> {
        self.entries.last().map(|e| e.key)
    }

    /// The active directive, resolved through the catalog
    pub fn top_directive<'c>(&self, catalog: &'c DirectiveCatalog) -> Option<&'c Directive> {
        self.top().and_then(|key| catalog.get(key))
    }

    /// Check whether the named directive is the active one
    pub fn is_top(&self, catalog: &DirectiveCatalog, id: &str) -> bool {
        catalog.key_of(id).is_some_and(|key| self.is_top_key(key))
    }

    /// Check whether the key is the active one
    #[inline]
    pub fn is_top_key(&self, key: DirectiveKey) -> bool {
        self.top() == Some(key)
    }

    /// Check whether a directive is asserted anywhere in the stack
    pub fn contains_key(&self, key: DirectiveKey) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Check whether the named directive is asserted anywhere in the stack
    pub fn contains(&self, catalog: &DirectiveCatalog, id: &str) -> bool {
        catalog.key_of(id).is_some_and(|key| self.contains_key(key))
    }

    /// Get number of asserted directives
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate front (least prominent) to back (active)
    pub fn iter(&self) -> impl Iterator<Item = &StackEntry> {
        self.entries.iter()
    }

    /// Directive names front to back
    pub fn names<'c>(&self, catalog: &'c DirectiveCatalog) -> Vec<&'c str> {
        self.entries
            .iter()
            .filter_map(|e| catalog.get(e.key))
            .map(|d| d.id.as_str())
            .collect()
    }

    /// Check the ordering and uniqueness invariants
    pub fn is_well_formed(&self) -> bool {
        let sorted = self
            .entries
            .windows(2)
            .all(|pair| pair[0].priority <= pair[1].priority);
        let unique = self
            .entries
            .iter()
            .enumerate()
            .all(|(i, e)| self.entries[i + 1..].iter().all(|other| other.key != e.key));
        sorted && unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompter_core::names::*;

    fn pair_catalog(a: i32, b: i32) -> DirectiveCatalog {
        let mut catalog = DirectiveCatalog::new();
        catalog.register("a", "A", a);
        catalog.register("b", "B", b);
        catalog
    }

    fn seeded() -> (DirectiveCatalog, DirectiveStack) {
        let mut catalog = DirectiveCatalog::new();
        catalog.register(NO_USER, "Is anyone there?", 1);
        catalog.register(TOO_MANY_USERS, "One person at a time, please!", 1);
        catalog.register(NO_BACKGROUND_VIDEO, "Please drag a background video onto this app!", 10);
        catalog.register(NO_FOREGROUND_VIDEO, "Please drag a foreground video onto this app!", 10);

        let mut stack = DirectiveStack::new();
        stack.push(&catalog, NO_USER);
        stack.push(&catalog, NO_BACKGROUND_VIDEO);
        stack.push(&catalog, NO_FOREGROUND_VIDEO);
        (catalog, stack)
    }

    #[test]
    fn test_equal_priority_earliest_stays_active() {
        let catalog = pair_catalog(1, 1);
        let mut stack = DirectiveStack::new();

        stack.push(&catalog, "a");
        stack.push(&catalog, "b");

        assert_eq!(stack.names(&catalog), vec!["b", "a"]);
        assert!(stack.is_top(&catalog, "a"));
    }

    #[test]
    fn test_higher_priority_goes_on_top() {
        let catalog = pair_catalog(1, 2);
        let mut stack = DirectiveStack::new();

        stack.push(&catalog, "a");
        stack.push(&catalog, "b");

        assert_eq!(stack.names(&catalog), vec!["a", "b"]);
        assert_eq!(stack.top_directive(&catalog).unwrap().label, "B");
    }

    #[test]
    fn test_lower_priority_stays_below() {
        let catalog = pair_catalog(2, 1);
        let mut stack = DirectiveStack::new();

        stack.push(&catalog, "a");
        stack.push(&catalog, "b");

        assert_eq!(stack.names(&catalog), vec!["b", "a"]);
        assert!(stack.is_top(&catalog, "a"));
    }

    #[test]
    fn test_reassertion_relocates() {
        let catalog = pair_catalog(1, 1);
        let mut stack = DirectiveStack::new();

        stack.push(&catalog, "a");
        stack.push(&catalog, "a");
        assert_eq!(stack.names(&catalog), vec!["a"]);

        // a is active; pushing it again moves it ahead of b
        stack.push(&catalog, "b");
        stack.push(&catalog, "a");
        assert_eq!(stack.names(&catalog), vec!["a", "b"]);
        assert!(stack.is_top(&catalog, "b"));
    }

    #[test]
    fn test_unknown_and_absent_are_noops() {
        let (catalog, mut stack) = seeded();
        let before = stack.names(&catalog);

        assert!(!stack.push(&catalog, "nonexistent"));
        assert!(!stack.remove(&catalog, "nonexistent"));
        assert!(!stack.remove(&catalog, TOO_MANY_USERS));

        assert_eq!(stack.names(&catalog), before);
    }

    #[test]
    fn test_startup_trace() {
        let (catalog, stack) = seeded();

        assert_eq!(
            stack.names(&catalog),
            vec![NO_USER, NO_FOREGROUND_VIDEO, NO_BACKGROUND_VIDEO]
        );
        assert!(stack.is_top(&catalog, NO_BACKGROUND_VIDEO));
        assert!(!stack.is_top(&catalog, NO_FOREGROUND_VIDEO));
        assert!(stack.contains(&catalog, NO_FOREGROUND_VIDEO));
    }

    #[test]
    fn test_pop_top_and_empty() {
        let (catalog, mut stack) = seeded();

        assert_eq!(stack.pop_top(), catalog.key_of(NO_BACKGROUND_VIDEO));
        assert!(stack.is_top(&catalog, NO_FOREGROUND_VIDEO));

        stack.pop_top();
        stack.pop_top();
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);
        assert!(stack.top_directive(&catalog).is_none());
        assert!(!stack.is_top(&catalog, NO_USER));
        assert_eq!(stack.pop_top(), None);
    }

    #[test]
    fn test_remove_key_only_first_match() {
        let (catalog, mut stack) = seeded();
        let key = catalog.key_of(NO_USER).unwrap();

        assert!(stack.remove_key(key));
        assert!(!stack.remove_key(key));
        assert_eq!(stack.len(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Push(usize),
            Remove(usize),
            PopTop,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0usize..8).prop_map(Op::Push),
                2 => (0usize..8).prop_map(Op::Remove),
                1 => Just(Op::PopTop),
            ]
        }

        proptest! {
            #[test]
            fn stack_stays_sorted_and_unique(
                priorities in prop::collection::vec(-3i32..4, 6),
                ops in prop::collection::vec(op(), 0..64),
            ) {
                let mut catalog = DirectiveCatalog::new();
                let names: Vec<String> = (0..priorities.len()).map(|i| format!("d{i}")).collect();
                for (name, priority) in names.iter().zip(&priorities) {
                    catalog.register(name.as_str(), name.as_str(), *priority);
                }

                let mut stack = DirectiveStack::new();
                for op in ops {
                    // Indices past the catalog exercise the unknown-name path
                    let name = |i: usize| names.get(i).map(String::as_str).unwrap_or("unknown");
                    match op {
                        Op::Push(i) => {
                            let known = stack.push(&catalog, name(i));
                            prop_assert_eq!(known, i < names.len());
                            if known {
                                prop_assert!(stack.contains(&catalog, name(i)));
                            }
                        }
                        Op::Remove(i) => {
                            stack.remove(&catalog, name(i));
                            prop_assert!(!stack.contains(&catalog, name(i)));
                        }
                        Op::PopTop => {
                            stack.pop_top();
                        }
                    }
                    prop_assert!(stack.is_well_formed());
                    prop_assert!(stack.len() <= catalog.len());
                }
            }

            #[test]
            fn repeated_push_is_idempotent(priority in -5i32..5, times in 1usize..6) {
                let mut catalog = DirectiveCatalog::new();
                catalog.register("x", "X", priority);
                catalog.register("y", "Y", 0);

                let mut stack = DirectiveStack::new();
                stack.push(&catalog, "y");
                let mut once = stack.clone();
                once.push(&catalog, "x");

                for _ in 0..times {
                    stack.push(&catalog, "x");
                }
                prop_assert_eq!(stack.names(&catalog), once.names(&catalog));
            }
        }
    }
}
