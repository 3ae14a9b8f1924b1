//! The selection store: files staged for upload.

use crate::types::SelectedFile;

/// Ordered set of staged files, keyed by name.
///
/// Adding a file whose name is already present replaces the existing
/// entry in place, so the set never holds two entries with the same
/// name and the replaced entry keeps its original position. Removal is
/// by exact name because that is what the list's remove buttons carry.
///
/// Membership is not gated on validation: rejected files stay listed so
/// their error can be shown next to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<H> {
    files: Vec<SelectedFile<H>>,
}

impl<H> Default for SelectionSet<H> {
    fn default() -> Self {
        Self { files: Vec::new() }
    }
}

impl<H> SelectionSet<H> {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `candidates` into the set, last write wins on name.
    pub fn add(&mut self, candidates: impl IntoIterator<Item = SelectedFile<H>>) {
        for candidate in candidates {
            match self.position(&candidate.name) {
                Some(index) => self.files[index] = candidate,
                None => self.files.push(candidate),
            }
        }
    }

    /// Remove the entry named `name`.
    ///
    /// Returns `true` if an entry was removed, `false` if none matched.
    pub fn remove(&mut self, name: &str) -> bool {
        self.position(name).is_some_and(|index| {
            self.files.remove(index);
            true
        })
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Current members in insertion order.
    #[must_use]
    pub fn list(&self) -> &[SelectedFile<H>] {
        &self.files
    }

    /// Number of staged files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|f| f.name == name)
    }
}
