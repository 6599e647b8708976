// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::flatten::{EMPTY_ARRAY_MARKER, EMPTY_OBJECT_MARKER, FlatMap, NIL_MARKER};
use crate::path::{join_path, split_path, PathError, Segment};

use std::collections::BTreeMap;

use thiserror::Error;

/// Error raised while inserting into or querying a [`Storage`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A `set` call with an empty key.
    #[error("empty key")]
    EmptyKey,
    /// The key does not match the path grammar.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The key uses a prefix as a map field where it is already an array
    /// index, or vice versa.
    #[error("conflicting kinds of nesting at key '{0}'")]
    KindMismatch(String),
    /// The key extends beyond a position that already holds a value.
    #[error("key '{0}' extends beyond an existing value")]
    LeafConflict(String),
    /// The key already has values nested under it; a value cannot replace
    /// a container.
    #[error("key '{0}' already has nested values")]
    ContainerConflict(String),
    /// `sub_keys` was asked to enumerate children of a scalar value.
    #[error("key '{0}' holds a value and has no sub-keys")]
    ScalarLeaf(String),
    /// The file table is full.
    #[error("too many files registered (limit {0})")]
    TooManyFiles(usize),
}

/// The nesting style of one position in the structural tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BranchKind {
    Keyed,
    Indexed,
}

impl BranchKind {
    fn of(segment: &Segment) -> BranchKind {
        match segment {
            Segment::Key(_) => BranchKind::Keyed,
            Segment::Index(_) => BranchKind::Indexed,
        }
    }
}

/// One node of the structural tree discovered so far. A `None` child is a
/// position reserved by a stored value; a `Some` child has further nesting.
#[derive(Debug, Clone)]
struct BranchNode {
    kind: BranchKind,
    children: BTreeMap<String, Option<Box<BranchNode>>>,
}

impl BranchNode {
    fn new(kind: BranchKind) -> BranchNode {
        BranchNode {
            kind,
            children: BTreeMap::new(),
        }
    }
}

/// Stored value together with the index of the source file that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafRecord {
    pub file: u16,
    pub value: String,
}

/// Flat key/value store that validates path shapes incrementally.
///
/// Values are inserted one flattened pair at a time, in any order, from any
/// number of registered source files. Each insertion is checked against the
/// structure implied by all previous insertions: a prefix can never be both
/// keyed and indexed, and never both a value and a container. The last
/// write to an exact key wins.
///
/// Built by a sequential ingestion pass; afterwards safe to query from
/// multiple threads since queries never mutate.
#[derive(Debug, Clone, Default)]
pub struct Storage {
    root: Option<BranchNode>,
    leaves: BTreeMap<String, LeafRecord>,
    empty_leaves: BTreeMap<String, LeafRecord>,
    files: BTreeMap<String, u16>,
}

fn is_empty_marker(value: &str) -> bool {
    matches!(value, NIL_MARKER | EMPTY_ARRAY_MARKER | EMPTY_OBJECT_MARKER)
}

impl Storage {
    pub fn new() -> Storage {
        Storage::default()
    }

    /// Register a source file, returning its index. Indices are assigned in
    /// first-seen order and are stable: re-registering a name returns the
    /// index it already has.
    pub fn add_file(&mut self, name: &str) -> Result<u16, StoreError> {
        if let Some(idx) = self.files.get(name) {
            return Ok(*idx);
        }
        let next = self.files.len();
        if next > u16::MAX as usize {
            return Err(StoreError::TooManyFiles(u16::MAX as usize + 1));
        }
        let idx = next as u16;
        self.files.insert(name.to_string(), idx);
        Ok(idx)
    }

    /// The index of a registered file, if any.
    pub fn file_index(&self, name: &str) -> Option<u16> {
        self.files.get(name).copied()
    }

    /// Registered file names in index order.
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<(u16, &String)> = self.files.iter().map(|(n, i)| (*i, n)).collect();
        names.sort();
        names.into_iter().map(|(_, n)| n.clone()).collect()
    }

    /// Store `value` at `key`, recording `file` as its origin.
    ///
    /// Fails if the key does not parse, or if any prefix of the key
    /// contradicts previously stored structure; a failed call leaves the
    /// store unchanged. The sentinel markers `<nil>`, `[]` and `{}` are
    /// tracked separately from ordinary values so that [`Storage::sub_keys`]
    /// can report recorded empty containers.
    pub fn set(&mut self, key: &str, value: &str, file: u16) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let segments = split_path(key)?;

        let root = self
            .root
            .get_or_insert_with(|| BranchNode::new(BranchKind::of(&segments[0])));

        let mut cursor: Option<&mut BranchNode> = Some(root);
        for (i, seg) in segments.iter().enumerate() {
            let node = match cursor {
                Some(n) => n,
                None => return Err(StoreError::LeafConflict(join_path(&segments[..=i]))),
            };
            if node.kind != BranchKind::of(seg) {
                return Err(StoreError::KindMismatch(join_path(&segments[..i])));
            }
            let last = i + 1 == segments.len();
            let child = node.children.entry(seg.text().to_string()).or_insert_with(|| {
                if last {
                    None
                } else {
                    Some(Box::new(BranchNode::new(BranchKind::of(&segments[i + 1]))))
                }
            });
            cursor = child.as_deref_mut();
        }
        if cursor.is_some() {
            return Err(StoreError::ContainerConflict(key.to_string()));
        }

        let record = LeafRecord {
            file,
            value: value.to_string(),
        };
        if is_empty_marker(value) {
            self.leaves.remove(key);
            self.empty_leaves.insert(key.to_string(), record);
        } else {
            self.empty_leaves.remove(key);
            self.leaves.insert(key.to_string(), record);
        }
        Ok(())
    }

    /// The value stored at `key`, or `""` when absent. Empty-container
    /// markers are excluded from ordinary lookup.
    pub fn get(&self, key: &str) -> String {
        self.get_or(key, "")
    }

    /// The value stored at `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        match self.leaves.get(key) {
            Some(record) => record.value.clone(),
            None => default.to_string(),
        }
    }

    /// Whether `key` is a stored value, a recorded empty container, or a
    /// container position in the structural tree. Never fails: malformed
    /// keys and structural conflicts answer `false`.
    pub fn has(&self, key: &str) -> bool {
        if self.leaves.contains_key(key) || self.empty_leaves.contains_key(key) {
            return true;
        }
        let Ok(segments) = split_path(key) else {
            return false;
        };
        let Some(root) = self.root.as_ref() else {
            return false;
        };
        let mut cursor: Option<&BranchNode> = Some(root);
        for seg in &segments {
            let Some(node) = cursor else {
                return false;
            };
            if node.kind != BranchKind::of(seg) {
                return false;
            }
            match node.children.get(seg.text()) {
                Some(child) => cursor = child.as_deref(),
                None => return false,
            }
        }
        true
    }

    /// The immediate child segments under `key`, lexicographically sorted.
    ///
    /// Answers `Some(vec![])` for a recorded empty container, `None` when
    /// the tree does not contain `key`, and an error when `key` holds a
    /// scalar value or contradicts stored structure.
    pub fn sub_keys(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        if self.empty_leaves.contains_key(key) {
            return Ok(Some(vec![]));
        }
        if self.leaves.contains_key(key) {
            return Err(StoreError::ScalarLeaf(key.to_string()));
        }
        let segments = split_path(key)?;
        let Some(root) = self.root.as_ref() else {
            return Ok(None);
        };
        let mut cursor: Option<&BranchNode> = Some(root);
        for (i, seg) in segments.iter().enumerate() {
            let node = match cursor {
                Some(n) => n,
                None => return Err(StoreError::LeafConflict(join_path(&segments[..=i]))),
            };
            if node.kind != BranchKind::of(seg) {
                return Err(StoreError::KindMismatch(join_path(&segments[..i])));
            }
            match node.children.get(seg.text()) {
                Some(child) => cursor = child.as_deref(),
                None => return Ok(None),
            }
        }
        match cursor {
            Some(node) => Ok(Some(node.children.keys().cloned().collect())),
            None => Err(StoreError::ScalarLeaf(key.to_string())),
        }
    }

    /// Every ordinary value key, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.leaves.keys().cloned().collect()
    }

    /// All stored values, ordinary and empty-container, keyed by path.
    pub fn data(&self) -> FlatMap {
        let mut out = FlatMap::new();
        for (k, record) in self.leaves.iter().chain(self.empty_leaves.iter()) {
            out.insert(k.clone(), record.value.clone());
        }
        out
    }

    /// All stored records with their source-file indices, keyed by path.
    pub fn raw_data(&self) -> BTreeMap<String, LeafRecord> {
        let mut out = BTreeMap::new();
        for (k, record) in self.leaves.iter().chain(self.empty_leaves.iter()) {
            out.insert(k.clone(), record.clone());
        }
        out
    }

    /// Number of stored leaves, ordinary and empty-container.
    pub fn len(&self) -> usize {
        self.leaves.len() + self.empty_leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.empty_leaves.is_empty()
    }
}
