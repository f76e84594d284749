//! Generic single-selection controller shared by every interactive section.

/// Items a [`Selection`] can point at: anything with a stable string id.
pub trait Keyed {
    fn key(&self) -> &'static str;
}

/// Where a selection sits when nothing has been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    None,
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Initial state and the state after [`Selection::reset`].
    pub default: Fallback,
    /// State after [`Selection::clear`] or toggling the selected item off.
    pub clear_to: Fallback,
}

impl SelectionPolicy {
    /// Nothing selected until the user picks something (modals, cards).
    pub const OPTIONAL: Self = Self {
        default: Fallback::None,
        clear_to: Fallback::None,
    };
    /// Always points at something; clearing returns to the first item.
    pub const ALWAYS_ONE: Self = Self {
        default: Fallback::First,
        clear_to: Fallback::First,
    };
    /// Starts on the first item but may be closed (accordions).
    pub const FIRST_OPEN: Self = Self {
        default: Fallback::First,
        clear_to: Fallback::None,
    };
}

/// An optional index into a fixed, static item list.
///
/// All mutation goes through ids, and an id that isn't in the list never
/// changes anything. The index is always in bounds.
#[derive(Debug, Clone)]
pub struct Selection<T: 'static> {
    items: &'static [T],
    policy: SelectionPolicy,
    current: Option<usize>,
}

impl<T: Keyed + 'static> Selection<T> {
    pub fn new(items: &'static [T], policy: SelectionPolicy) -> Self {
        Self {
            items,
            policy,
            current: Self::resolve(items, policy.default),
        }
    }

    fn resolve(items: &[T], fallback: Fallback) -> Option<usize> {
        match fallback {
            Fallback::First if !items.is_empty() => Some(0),
            _ => None,
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key() == id)
    }

    /// Select `id`. Returns whether the selection changed.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(idx) = self.index_of(id) else {
            tracing::debug!(id, "select ignored unknown id");
            return false;
        };
        let changed = self.current != Some(idx);
        self.current = Some(idx);
        changed
    }

    /// Select `id`, or clear it if it is already selected. Unknown ids are
    /// ignored. Returns whether the selection changed.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(idx) = self.index_of(id) else {
            tracing::debug!(id, "toggle ignored unknown id");
            return false;
        };
        if self.current == Some(idx) {
            self.clear()
        } else {
            self.current = Some(idx);
            true
        }
    }

    /// Apply the policy's clear state. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        let next = Self::resolve(self.items, self.policy.clear_to);
        let changed = self.current != next;
        self.current = next;
        changed
    }

    /// Return to the policy default.
    pub fn reset(&mut self) {
        self.current = Self::resolve(self.items, self.policy.default);
    }

    /// Swap in a new item list, keeping the current id when the new list
    /// has it and falling back to the default otherwise.
    pub fn rebind(&mut self, items: &'static [T]) {
        let kept = self.current_key().and_then(|key| {
            items.iter().position(|item| item.key() == key)
        });
        self.items = items;
        self.current = kept.or_else(|| Self::resolve(items, self.policy.default));
    }

    pub fn current(&self) -> Option<&'static T> {
        let items = self.items;
        self.current.and_then(|i| items.get(i))
    }

    pub fn current_key(&self) -> Option<&'static str> {
        self.current().map(Keyed::key)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.current_key() == Some(id)
    }

    pub fn items(&self) -> &'static [T] {
        self.items
    }
}
