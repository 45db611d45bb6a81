//! This crate exposes two Binary Search Trees (BSTs) with the same interface so that they can be
//! fed the same data and compared: a plain, unbalanced BST and a self-balancing AVL tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert and find stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! the value that was inserted with it and will sometimes have child
//! `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is the number of
//! `Node`s on the longest path from the root to a leaf). An unbalanced BST
//! has whatever height the insertion order gives it, up to `N` for sorted
//! input. An AVL tree rotates nodes after every insertion so that the two
//! subtrees of every `Node` differ in height by at most one, which bounds
//! its height by roughly `1.44 * lg N`.
//!
//! Neither tree supports deletion, and inserting a key that is already
//! present leaves the tree untouched.
//!
//! ## Comparing
//!
//! [`records`] loads delimited files into `(key, record)` pairs and
//! [`compare`] times both trees on them. The `bst-avl` binary wires the two
//! together.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod compare;
pub mod records;
pub mod unbalanced;

mod traverse;


/// The unbalanced tree.
pub type OrderedTree<K, V> = unbalanced::Tree<K, V>;

/// The self-balancing tree.
pub type BalancedTree<K, V> = avl::Tree<K, V>;

/// The operations both trees support, so code can be written once and run against either.
///
/// # Examples
///
/// ```
/// use bst_avl::{BalancedTree, OrderedTree, SearchTree};
///
/// fn fill<T: SearchTree<u32, ()>>(tree: &mut T) {
///     for key in 0..7 {
///         tree.insert(key, ());
///     }
/// }
///
/// let mut ordered = OrderedTree::new();
/// let mut balanced = BalancedTree::new();
/// fill(&mut ordered);
/// fill(&mut balanced);
///
/// assert_eq!(ordered.height(), 7);
/// assert_eq!(balanced.height(), 3);
/// ```
pub trait SearchTree<K, V> {
    /// Inserts `value` at `key` unless `key` is already present.
    fn insert(&mut self, key: K, value: V);

    /// Finds the value stored at `key`.
    fn search(&self, key: &K) -> Option<&V>;

    /// The number of levels in the tree, 0 when empty.
    fn height(&self) -> usize;

    /// Counts the nodes by visiting each one.
    fn count_nodes(&self) -> usize;
}

impl<K: Ord, V> SearchTree<K, V> for unbalanced::Tree<K, V> {
    fn insert(&mut self, key: K, value: V) {
        unbalanced::Tree::insert(self, key, value)
    }

    fn search(&self, key: &K) -> Option<&V> {
        unbalanced::Tree::search(self, key)
    }

    fn height(&self) -> usize {
        unbalanced::Tree::height(self)
    }

    fn count_nodes(&self) -> usize {
        unbalanced::Tree::count_nodes(self)
    }
}

impl<K: Ord, V> SearchTree<K, V> for avl::Tree<K, V> {
    fn insert(&mut self, key: K, value: V) {
        avl::Tree::insert(self, key, value)
    }

    fn search(&self, key: &K) -> Option<&V> {
        avl::Tree::search(self, key)
    }

    fn height(&self) -> usize {
        avl::Tree::height(self)
    }

    fn count_nodes(&self) -> usize {
        avl::Tree::count_nodes(self)
    }
}
