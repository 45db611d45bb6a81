use bst_avl::{BalancedTree, OrderedTree, SearchTree};

/// Inserts every key into `tree` with a payload derived from the key.
fn fill<T: SearchTree<&'static str, String>>(tree: &mut T, keys: &[&'static str]) {
    for key in keys {
        tree.insert(*key, key.repeat(2));
    }
}

fn root_key<'a>(root: Option<(&&'a str, &String)>) -> Option<&'a str> {
    root.map(|(k, _)| *k)
}

#[test]
fn balanced_input_needs_no_rotation() {
    let mut avl = BalancedTree::new();
    fill(&mut avl, &["b", "a", "c"]);

    assert_eq!(root_key(avl.root()), Some("b"));
    assert_eq!(avl.height(), 2);
}

#[test]
fn three_ascending_keys() {
    let keys = ["a", "b", "c"];
    let mut avl = BalancedTree::new();
    let mut bst = OrderedTree::new();
    fill(&mut avl, &keys);
    fill(&mut bst, &keys);

    assert_eq!(root_key(avl.root()), Some("b"));
    assert_eq!(avl.height(), 2);

    assert_eq!(root_key(bst.root()), Some("a"));
    assert_eq!(bst.height(), 3);
}

#[test]
fn five_ascending_keys() {
    let keys = ["a", "b", "c", "d", "e"];
    let mut avl = BalancedTree::new();
    let mut bst = OrderedTree::new();
    fill(&mut avl, &keys);
    fill(&mut bst, &keys);

    assert!(avl.height() <= 3);
    assert_eq!(bst.height(), 5);
    assert_eq!(avl.count_nodes(), 5);
    assert_eq!(bst.count_nodes(), 5);
}

#[test]
fn both_trees_agree_on_lookups() {
    let keys = ["m", "c", "x", "a", "e", "q", "z", "d"];
    let mut avl = BalancedTree::new();
    let mut bst = OrderedTree::new();
    fill(&mut avl, &keys);
    fill(&mut bst, &keys);

    for key in keys {
        let expected = key.repeat(2);
        assert_eq!(avl.search(&key), Some(&expected));
        assert_eq!(bst.search(&key), Some(&expected));
    }
    for missing in ["b", "y", ""] {
        assert_eq!(avl.search(&missing), None);
        assert_eq!(bst.search(&missing), None);
    }

    assert!(avl.iter().eq(bst.iter()));
}

#[test]
fn duplicates_keep_the_first_payload() {
    let mut avl = BalancedTree::new();
    let mut bst = OrderedTree::new();
    fill(&mut avl, &["k", "j", "l"]);
    fill(&mut bst, &["k", "j", "l"]);

    avl.insert("j", "replacement".to_string());
    bst.insert("j", "replacement".to_string());

    assert_eq!(avl.search(&"j"), Some(&"jj".to_string()));
    assert_eq!(bst.search(&"j"), Some(&"jj".to_string()));
    assert_eq!(avl.count_nodes(), 3);
    assert_eq!(bst.count_nodes(), 3);
}

#[test]
fn avl_is_never_taller_on_sorted_input() {
    let mut avl = BalancedTree::new();
    let mut bst = OrderedTree::new();
    for n in 0u32..2_000 {
        avl.insert(n, ());
        bst.insert(n, ());
        assert!(avl.height() <= bst.height());
    }

    assert_eq!(bst.height(), 2_000);
    // Between ceil(lg(2_001)) and 1.44 * lg(2_002).
    assert!((11..=15).contains(&avl.height()));
}

mod shuffled {
    use bst_avl::{BalancedTree, OrderedTree};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    const KEYS: u32 = 256;
    const ROUNDS: usize = 32;

    /// Sums the heights of both trees over `ROUNDS` shuffles of `0..KEYS`.
    fn total_heights(seed: u64) -> (usize, usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut keys: Vec<u32> = (0..KEYS).collect();
        let (mut avl_total, mut bst_total) = (0, 0);

        for _ in 0..ROUNDS {
            keys.shuffle(&mut rng);
            let mut avl = BalancedTree::new();
            let mut bst = OrderedTree::new();
            for &key in &keys {
                avl.insert(key, ());
                bst.insert(key, ());
            }

            // ceil(lg(257)) and 1.44 * lg(258).
            assert!(bst.height() >= 9);
            assert!((9..=11).contains(&avl.height()));
            avl_total += avl.height();
            bst_total += bst.height();
        }

        (avl_total, bst_total)
    }

    #[test]
    fn avl_is_shorter_on_average() {
        let (avl_total, bst_total) = total_heights(2024);

        assert!(avl_total < bst_total);
    }

    quickcheck::quickcheck! {
        fn avl_is_shorter_on_average_for_any_seed(seed: u64) -> bool {
            let (avl_total, bst_total) = total_heights(seed);
            avl_total < bst_total
        }
    }
}
