//! A self-balancing BST (specifically, an AVL tree). Each node caches the height of the subtree
//! rooted at it and, after every insertion, each node on the insertion path rotates itself if
//! one of its subtrees has become more than one level taller than the other.
//!
//! This keeps the height under `1.44 * lg(N + 2)` so the recursion used to insert never gets
//! deeper than a few dozen frames, and [`Tree::height`] is a field read rather than a traversal.
//!
//! # Examples
//!
//! ```
//! use bst_avl::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Sorted input would make a chain in an unbalanced tree.
//! for key in ["a", "b", "c"] {
//!     tree.insert(key, key.len());
//! }
//!
//! assert_eq!(tree.root(), Some((&"b", &1)));
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.search(&"c"), Some(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::traverse::{self, Branch, InOrder};

/// A self-balancing Binary Search Tree. This can be used for inserting and finding keys and
/// values.
pub struct Tree<K, V> {
    root: Option<Box<Node<K, V>>>,
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
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

    /// Inserts the given value into the tree stored at the given key, rebalancing on the way back
    /// up. If the key is already present nothing happens: the existing value is kept, the new one
    /// is dropped and no heights change.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_avl::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// assert_eq!(tree.search(&1), Some(&2));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.search(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let (root, descent) = match self.root.take() {
            Some(root) => root.insert(key, value),
            None => (Node::new_boxed(key, value), Descent::Created),
        };
        self.root = Some(root);

        if descent != Descent::Duplicate {
            self.len += 1;
        }
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_avl::avl::Tree;
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

    /// The number of levels in the tree. This is the root's cached height so it's `O(1)`.
    pub fn height(&self) -> usize {
        height(&self.root)
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

/// Which way an insertion went at a node. A parent uses its child's `Descent` to tell whether
/// the new key landed in the child's left or right subtree without having to compare keys again
/// (the key itself has been moved into the new leaf by then).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Descent {
    /// The key was smaller than this node's key.
    Left,
    /// The key was larger than this node's key.
    Right,
    /// This node is the new leaf.
    Created,
    /// This node already had the key so nothing changed anywhere.
    Duplicate,
}

fn height<K, V>(link: &Option<Box<Node<K, V>>>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            height: 1,
            key,
            left: None,
            right: None,
            value,
        })
    }

    /// Inserts into the subtree rooted at `self` and returns the new root of that subtree along
    /// with the direction taken at `self`.
    fn insert(mut self: Box<Self>, key: K, value: V) -> (Box<Self>, Descent)
    where
        K: Ord,
    {
        let (descent, child_descent) = match key.cmp(&self.key) {
            Ordering::Less => {
                let (left, child_descent) = match self.left.take() {
                    Some(left) => left.insert(key, value),
                    None => (Self::new_boxed(key, value), Descent::Created),
                };
                self.left = Some(left);
                (Descent::Left, child_descent)
            }
            Ordering::Equal => return (self, Descent::Duplicate),
            Ordering::Greater => {
                let (right, child_descent) = match self.right.take() {
                    Some(right) => right.insert(key, value),
                    None => (Self::new_boxed(key, value), Descent::Created),
                };
                self.right = Some(right);
                (Descent::Right, child_descent)
            }
        };

        if child_descent == Descent::Duplicate {
            return (self, Descent::Duplicate);
        }

        (self.rebalance(child_descent), descent)
    }

    /// Refreshes the height of `self` and, if it's now out of balance, rotates it back into
    /// balance. `child_descent` is the direction the new key took at the child on the heavy side
    /// which picks between a single and a double rotation.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn rebalance(mut self: Box<Self>, child_descent: Descent) -> Box<Self> {
        self.fix_height();
        let balance = self.balance_factor();

        let new_root = match (balance, child_descent) {
            // Left-Left
            (b, Descent::Left) if b > 1 => self.rotate_right(),
            // Right-Right
            (b, Descent::Right) if b < -1 => self.rotate_left(),
            // Left-Right
            (b, Descent::Right) if b > 1 => {
                self.left = self.left.take().map(Node::rotate_left);
                self.rotate_right()
            }
            // Right-Left
            (b, Descent::Left) if b < -1 => {
                self.right = self.right.take().map(Node::rotate_right);
                self.rotate_left()
            }
            _ => self,
        };

        if cfg!(debug_assertions) {
            let left_height = height(&new_root.left);
            let right_height = height(&new_root.right);
            assert_eq!(new_root.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }

        new_root
    }

    /// Rotate `self` to the left. This moves the right child up vertically and `self` down
    /// vertically. Used to rebalance the tree when the right child is too tall. As such, it must
    /// only be called when there _is_ a right child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   old_root (i.e. "self")            new_root
    ///    /     \                          /     \
    ///   x    new_root      rotate ->  old_root   z
    ///         /  \                     /  \
    ///        y    z                   x    y
    /// ```
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.right.take().expect("Rotate left => right child");

        self.right = new_root.left.take();
        self.fix_height();

        new_root.left = Some(self);
        new_root.fix_height();
        new_root
    }

    /// Rotate `self` to the right. The mirror image of [`Node::rotate_left`].
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      old_root (i.e. "self")        new_root
    ///       /     \                      /     \
    ///   new_root   z       rotate ->    x   old_root
    ///    /  \                                /  \
    ///   x    y                              y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.left.take().expect("Rotate right => left child");

        self.left = new_root.right.take();
        self.fix_height();

        new_root.right = Some(self);
        new_root.fix_height();
        new_root
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// The height of the left subtree minus the height of the right subtree, so positive means
    /// left-heavy. See [the Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
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

/// Walks the whole tree checking ordering, cached heights and balance. Returns the real height.
#[cfg(test)]
fn check_node<K: Ord, V>(node: Option<&Node<K, V>>) -> usize {
    let Some(node) = node else {
        return 0;
    };
    if let Some(left) = node.left.as_deref() {
        assert!(left.key < node.key);
    }
    if let Some(right) = node.right.as_deref() {
        assert!(right.key > node.key);
    }

    let left_height = check_node(node.left.as_deref());
    let right_height = check_node(node.right.as_deref());
    assert!(left_height.abs_diff(right_height) <= 1);
    assert_eq!(node.height, left_height.max(right_height) + 1);

    node.height
}


#[cfg(test)]
mod quicktests {
    use std::collections::{BTreeMap, HashSet};

    use super::*;
    use crate::test::quick::{apply_to_map, Op};

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            let mut tree = Tree::new();
            let mut map = BTreeMap::new();

            for op in &ops {
                match *op {
                    Op::Insert(k, v) => {
                        tree.insert(k, v);
                        check_node(tree.root.as_deref());
                    }
                    Op::Search(k) => {
                        if tree.search(&k) != map.get(&k) {
                            return false;
                        }
                    }
                    Op::Iter => {
                        if !tree.iter().eq(map.iter()) {
                            return false;
                        }
                    }
                }
                apply_to_map(op, &mut map);
            }

            tree.count_nodes() == map.len()
                && tree.len() == map.len()
                && map.keys().all(|key| tree.search(key) == map.get(key))
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, *x);
            }

            xs.iter().all(|x| tree.search(x) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, *x);
            }
            let added: HashSet<_> = xs.into_iter().collect();
            let nots: HashSet<_> = nots.into_iter().collect();
            let mut nots = nots.difference(&added);

            nots.all(|x| tree.search(x).is_none())
        }
    }

    quickcheck::quickcheck! {
        fn cached_height_matches_real_height(xs: Vec<i16>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, ());
            }

            check_node(tree.root.as_deref()) == tree.height()
                && traverse::height(tree.root.as_deref()) == tree.height()
        }
    }

    quickcheck::quickcheck! {
        fn height_within_avl_bounds(xs: HashSet<u16>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, ());
            }
            let n = xs.len();
            let lower_bound = (usize::BITS - n.leading_zeros()) as usize;
            let upper_bound = 1.44 * ((n + 2) as f64).log2();

            tree.height() >= lower_bound && tree.height() as f64 <= upper_bound
        }
    }
}
