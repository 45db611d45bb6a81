//! A plain, unbalanced BST. The shape of the tree is entirely decided by the order keys are
//! inserted in: random insertion order gives an expected height of `O(lg N)` but sorted insertion
//! order degrades it to a chain of height `N`.
//!
//! Every operation here is written with loops or explicit stacks rather than recursion so that a
//! chain of any length can be built, searched, measured and dropped.
//!
//! # Examples
//!
//! ```
//! use bst_avl::unbalanced::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), None);
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.search(&1), Some(&2));
//!
//! // Inserting the same key again is ignored - the first value stays.
//! tree.insert(1, 3);
//! assert_eq!(tree.search(&1), Some(&2));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::traverse::{self, Branch, InOrder};

/// An unbalanced Binary Search Tree. This can be used for inserting and finding keys and values.
pub struct Tree<K, V> {
    root: Option<Box<Node<K, V>>>,
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    // The default drop recurses once per level which a sorted insertion order turns into once per
    // node. Detach children before dropping each node instead.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts the given value into the tree stored at the given key. If the key is already
    /// present nothing happens: the existing value is kept and the new one is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_avl::unbalanced::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert("b", 2);
    /// tree.insert("a", 1);
    /// tree.insert("b", 3);
    ///
    /// assert_eq!(tree.search(&"b"), Some(&2));
    /// assert_eq!(tree.count_nodes(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return,
                Ordering::Greater => &mut node.right,
            };
        }

        *link = Some(Node::new_boxed(key, value));
        self.len += 1;
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_avl::unbalanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.search(&1), Some(&2));
    /// assert_eq!(tree.search(&42), None);
    /// ```
    pub fn search(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            node = match key.cmp(&n.key) {
                Ordering::Less => n.left.as_deref(),
                Ordering::Equal => return Some(&n.value),
                Ordering::Greater => n.right.as_deref(),
            };
        }

        None
    }

    /// The number of levels in the tree. Nothing is cached so this visits every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_avl::unbalanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// for key in ["a", "b", "c"] {
    ///     tree.insert(key, ());
    /// }
    ///
    /// // Sorted input makes a chain.
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        traverse::height(self.root.as_deref())
    }

    /// Counts the nodes by walking the whole tree. See [`Tree::len`] for the cached count.
    pub fn count_nodes(&self) -> usize {
        traverse::count_nodes(self.root.as_deref())
    }

    /// The number of keys inserted so far, not counting ignored duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The key and value at the root of the tree.
    pub fn root(&self) -> Option<(&K, &V)> {
        self.root.as_deref().map(Branch::entry)
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(InOrder::new(self.root.as_deref()))
    }
}

/// In-order iterator returned by [`Tree::iter`].
pub struct Iter<'a, K, V>(InOrder<'a, Node<K, V>>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

impl<K, V> Branch for Node<K, V> {
    type Key = K;
    type Value = V;

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}
