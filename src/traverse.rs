//! Traversals shared by both tree flavours. Everything in here walks the tree with an explicit
//! stack so that a degenerate (chain shaped) unbalanced tree can't overflow the call stack.

/// The shape both kinds of `Node` have in common: a key, a value and up to two children.
pub(crate) trait Branch {
    type Key;
    type Value;

    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
    fn entry(&self) -> (&Self::Key, &Self::Value);
}

/// Counts every node reachable from `root`.
pub(crate) fn count_nodes<N: Branch>(root: Option<&N>) -> usize {
    let mut stack: Vec<&N> = root.into_iter().collect();
    let mut count = 0;
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.left());
        stack.extend(node.right());
    }

    count
}

/// Computes the height of the subtree at `root` by visiting every node. An empty subtree has a
/// height of 0 and a lone node has a height of 1.
pub(crate) fn height<N: Branch>(root: Option<&N>) -> usize {
    let mut stack: Vec<(&N, usize)> = root.map(|n| (n, 1)).into_iter().collect();
    let mut height = 0;
    while let Some((node, depth)) = stack.pop() {
        height = height.max(depth);
        stack.extend(node.left().map(|n| (n, depth + 1)));
        stack.extend(node.right().map(|n| (n, depth + 1)));
    }

    height
}

/// In-order iterator over the entries of a subtree.
pub(crate) struct InOrder<'a, N> {
    // Nodes whose left subtree has already been pushed but which haven't been yielded yet.
    stack: Vec<&'a N>,
}

impl<'a, N: Branch> InOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a N>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, N: Branch> Iterator for InOrder<'a, N> {
    type Item = (&'a N::Key, &'a N::Value);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.entry())
    }
}
