//! Times both trees on the same data: every entry is inserted into a fresh tree of each kind in
//! the same order, then the same random sample of keys is searched in both.

use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::records::{Dataset, Record};
use crate::{BalancedTree, OrderedTree, SearchTree};

/// What one tree looked like after a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measurement {
    /// Time spent inserting every entry.
    pub insert_time: Duration,
    /// Time spent searching every sampled key.
    pub search_time: Duration,
    /// Height after all the insertions.
    pub height: usize,
    /// Node count after all the insertions, by traversal.
    pub nodes: usize,
    /// How many sampled keys were found.
    pub hits: usize,
}

/// Results for both trees over the same entries and queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comparison {
    /// Number of distinct keys inserted into each tree.
    pub unique_keys: usize,
    /// Number of keys searched in each tree.
    pub queries: usize,
    /// The unbalanced tree.
    pub ordered: Measurement,
    /// The AVL tree.
    pub balanced: Measurement,
}

impl Comparison {
    /// Whether neither tree lost a key: both hold exactly the unique keys and found every query.
    pub fn is_consistent(&self) -> bool {
        [&self.ordered, &self.balanced]
            .iter()
            .all(|m| m.nodes == self.unique_keys && m.hits == self.queries)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bst, avl) = (&self.ordered, &self.balanced);
        writeln!(f, "--- RESULTS ---")?;
        writeln!(f, "Unique keys in input: {}", self.unique_keys)?;
        writeln!(f, "Nodes in BST: {}", bst.nodes)?;
        writeln!(f, "Nodes in AVL: {}", avl.nodes)?;
        writeln!(f)?;
        writeln!(f, "BST insert time: {:.6} s", bst.insert_time.as_secs_f64())?;
        writeln!(f, "AVL insert time: {:.6} s", avl.insert_time.as_secs_f64())?;
        writeln!(
            f,
            "BST search time ({} keys): {:.6} s",
            self.queries,
            bst.search_time.as_secs_f64()
        )?;
        writeln!(
            f,
            "AVL search time ({} keys): {:.6} s",
            self.queries,
            avl.search_time.as_secs_f64()
        )?;
        writeln!(f, "BST height: {}", bst.height)?;
        write!(f, "AVL height: {}", avl.height)
    }
}

/// Picks `amount` distinct keys uniformly at random. Asking for more keys than there are returns
/// all of them (in random order).
pub fn sample_keys<K, R>(keys: &[K], amount: usize, rng: &mut R) -> Vec<K>
where
    K: Clone,
    R: Rng + ?Sized,
{
    keys.choose_multiple(rng, amount).cloned().collect()
}

/// Inserts every entry into `tree` and then searches every query, timing both phases. The entries
/// are cloned before the clock starts so only tree work is timed.
pub fn measure<T, K, V>(mut tree: T, entries: &[(K, V)], queries: &[K]) -> Measurement
where
    T: SearchTree<K, V>,
    K: Clone,
    V: Clone,
{
    let entries = entries.to_vec();

    let start = Instant::now();
    for (key, value) in entries {
        tree.insert(key, value);
    }
    let insert_time = start.elapsed();

    let height = tree.height();
    let nodes = tree.count_nodes();

    let start = Instant::now();
    let hits = queries
        .iter()
        .filter(|key| tree.search(key).is_some())
        .count();
    let search_time = start.elapsed();

    Measurement {
        insert_time,
        search_time,
        height,
        nodes,
        hits,
    }
}

/// Runs [`measure`] on an unbalanced tree and an AVL tree with the dataset's rows and the same
/// `samples` random keys. Both trees share each row rather than getting their own copy.
pub fn compare<R>(dataset: &Dataset, samples: usize, rng: &mut R) -> Comparison
where
    R: Rng + ?Sized,
{
    let entries: Vec<(String, Rc<Record>)> = dataset
        .rows
        .iter()
        .map(|(key, record)| (key.clone(), Rc::new(record.clone())))
        .collect();
    let keys: Vec<String> = dataset.keys().map(str::to_string).collect();
    let queries = sample_keys(&keys, samples, rng);

    Comparison {
        unique_keys: keys.len(),
        queries: queries.len(),
        ordered: measure(OrderedTree::new(), &entries, &queries),
        balanced: measure(BalancedTree::new(), &entries, &queries),
    }
}
