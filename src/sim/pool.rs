//! Pools of short-lived entities (bullets, enemies)
//!
//! Scans run from the back so an element can be dropped mid-pass without
//! skipping or revisiting its neighbours.

/// Outcome of visiting one pool element during [`Pool::sweep`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Keep,
    Remove,
}

/// Unordered collection of same-kind entities
#[derive(Debug, Clone, PartialEq)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove the element at `index`.
    ///
    /// The last element takes its slot, which is safe inside a backward scan
    /// because that element has already been visited.
    pub fn remove_at(&mut self, index: usize) -> T {
        self.items.swap_remove(index)
    }

    /// Visit every element from the back, dropping those the visitor rejects
    pub fn sweep(&mut self, mut visit: impl FnMut(&mut T) -> Sweep) {
        let mut i = self.items.len();
        while i > 0 {
            i -= 1;
            if visit(&mut self.items[i]) == Sweep::Remove {
                self.items.swap_remove(i);
            }
        }
    }

    pub fn for_each_alive(&mut self, visit: impl FnMut(&mut T)) {
        self.items.iter_mut().rev().for_each(visit);
    }

    /// Index of the first element matching `pred` in backward scan order
    pub fn find_rev(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().rposition(|item| pred(item))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
