//! Module provide ordered-map implemented by [RankTree] type.
//!
//! RankTree is implemented using an [AVL tree][wiki-avl] where every node
//! caches the number of nodes in its subtree.
//!
//! - Each entry in RankTree instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - CRUD operations, via insert(), find(), get(), remove() api.
//! - Order statistics, via find_by_rank(), get_by_rank(), rank_of() api.
//! - Full table scan, to iterate over all entries in key order.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RankTree] instance and CRUD operations:
//!
//! ```
//! use ranktree::RankTree;
//!
//! let mut index: RankTree<String, String> = RankTree::new();
//! index.insert("key1".to_string(), "value1".to_string()).unwrap();
//! index.insert("key2".to_string(), "value2".to_string()).unwrap();
//! assert!(index.insert("key2".to_string(), "value3".to_string()).is_err());
//!
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.get("key1").unwrap(), "value1");
//!
//! let (key, value) = index.remove("key1").unwrap();
//! assert_eq!((key.as_str(), value.as_str()), ("key1", "value1"));
//! ```
//!
//! Select by rank, in either direction:
//!
//! ```
//! use ranktree::{Order, RankTree};
//!
//! let mut index: RankTree<u32, ()> = RankTree::with_order(Order::Descending);
//! for key in 1..=10 {
//!     index.insert(key, ()).unwrap();
//! }
//! assert_eq!(*index.find_by_rank(1).unwrap(), 10);
//! assert_eq!(index.rank_of(&7).unwrap(), 4);
//! ```
//!
//! [wiki-avl]: https://en.wikipedia.org/wiki/AVL_tree

use log::debug;

use std::{
    borrow::Borrow,
    cmp::{self, Ordering},
    fmt,
    iter::FromIterator,
    mem,
};

use crate::{
    node::{self, Node},
    order::Order,
    rotate::rebalance,
    Error, Result,
};

/// RankTree manage a single instance of in-memory order-statistics tree
/// using [AVL][avl] balancing.
///
/// Size of the tree is the cached rank of its root, so `len()` is O(1).
///
/// [avl]: https://en.wikipedia.org/wiki/AVL_tree
pub struct RankTree<K, V> {
    pub(crate) root: Option<Box<Node<K, V>>>,
    pub(crate) order: Order,
}

impl<K, V> Default for RankTree<K, V> {
    fn default() -> RankTree<K, V> {
        RankTree::new()
    }
}

impl<K, V> RankTree<K, V> {
    /// Create an empty instance of RankTree, rank 1 is the smallest key.
    pub fn new() -> RankTree<K, V> {
        RankTree::with_order(Order::Ascending)
    }

    /// Create an empty instance of RankTree, with rank 1 at the smallest
    /// key for `Ascending` order and at the largest key for `Descending`.
    pub fn with_order(order: Order) -> RankTree<K, V> {
        RankTree { root: None, order }
    }
}

/// Maintenance API.
impl<K, V> RankTree<K, V> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        node::rank(self.root.as_deref())
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return the height of the tree, 0 for an empty tree.
    #[inline]
    pub fn height(&self) -> usize {
        node::height(self.root.as_deref())
    }

    /// Return the rank direction of this instance.
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Change the rank direction. Shape of the tree is not touched.
    pub fn set_order(&mut self, order: Order) {
        self.order = order
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.root = None
    }

    /// Validate AVL tree with following rules:
    ///
    /// * Keys are in strictly ascending order, every key lies between
    ///   the bounds set by all its ancestors.
    /// * Cached height is the true height of every subtree.
    /// * Cached rank is the true number of nodes in every subtree.
    /// * Height of left and right subtree differ by at most 1.
    pub fn validate(&self) -> Result<()>
    where
        K: Ord + fmt::Debug,
    {
        Self::validate_tree(self.root.as_deref(), None, None)?;
        Ok(())
    }
}

/// Write API.
impl<K, V> RankTree<K, V> {
    /// Insert a new entry. If key is already present, tree is left
    /// untouched and `KeyAlreadyExists` is returned, `value` is dropped.
    /// Use [RankTree::try_insert] to get it back.
    pub fn insert(&mut self, key: K, value: V) -> Result<()>
    where
        K: Ord,
    {
        match self.try_insert(key, value) {
            Ok(()) => Ok(()),
            Err(_) => err_at!(KeyAlreadyExists, msg: "key already exists in tree"),
        }
    }

    /// Insert a new entry. If key is already present, tree is left
    /// untouched and the rejected entry is handed back to the caller.
    pub fn try_insert(&mut self, key: K, value: V) -> std::result::Result<(), (K, V)>
    where
        K: Ord,
    {
        let (root, rejected) = Self::do_insert(self.root.take(), key, value);
        self.root = Some(root);
        match rejected {
            Some(entry) => Err(entry),
            None => Ok(()),
        }
    }

    /// Remove key from this instance and return its entry. If key is
    /// not present, tree is left untouched and `KeyNotFound` is returned.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, entry) = Self::do_remove(self.root.take(), key);
        self.root = root;
        match entry {
            Some(entry) => Ok(entry),
            None => err_at!(KeyNotFound, msg: "key not found in tree"),
        }
    }
}

/// Read API.
impl<K, V> RankTree<K, V> {
    /// Return the node for key.
    pub fn find<Q>(&self, key: &Q) -> Result<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Some(node) => Ok(node),
            None => err_at!(KeyNotFound, msg: "key not found in tree"),
        }
    }

    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(Node::as_value)
    }

    /// Get a mutable reference to the value for key. Key itself cannot be
    /// mutated, it would break the order.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref_mut();
        while let Some(nref) = node {
            node = match nref.key.borrow().cmp(key) {
                Ordering::Less => nref.right.as_deref_mut(),
                Ordering::Greater => nref.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut nref.value),
            };
        }
        None
    }

    /// Check whether key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Return the key at 1-based `rank`, counted from the smallest key
    /// in `Ascending` order and from the largest key in `Descending`
    /// order. `rank` must be within `1..=len()`.
    pub fn find_by_rank(&self, rank: usize) -> Result<&K> {
        Ok(self.select(rank)?.as_key())
    }

    /// Same as [RankTree::find_by_rank], returning the value as well.
    pub fn get_by_rank(&self, rank: usize) -> Result<(&K, &V)> {
        let node = self.select(rank)?;
        Ok((node.as_key(), node.as_value()))
    }

    /// Return the 1-based rank of key, in this tree's order.
    pub fn rank_of<Q>(&self, key: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        let mut skipped = 0;
        while let Some(nref) = node {
            let ord = self.order.apply(key.cmp(nref.key.borrow()));
            let near = self.near(nref);
            node = match ord {
                Ordering::Less => near,
                Ordering::Equal => return Ok(skipped + node::rank(near) + 1),
                Ordering::Greater => {
                    skipped += node::rank(near) + 1;
                    self.far(nref)
                }
            };
        }
        err_at!(KeyNotFound, msg: "key not found in tree")
    }

    /// Return an iterator over all entries in ascending key order.
    pub fn iter(&self) -> Iter<K, V> {
        let mut paths = Vec::default();
        build_iter(self.root.as_deref(), &mut paths);
        Iter {
            paths,
            remaining: self.len(),
        }
    }

    /// Export all entries in ascending key order.
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Consume the tree and hand over every entry in ascending key order.
    pub fn into_vec(self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len());
        drain_tree(self.root, &mut entries);
        entries
    }
}

type Upsert<K, V> = (Box<Node<K, V>>, Option<(K, V)>);
type Delete<K, V> = (Option<Box<Node<K, V>>>, Option<(K, V)>);
type Delmin<K, V> = (Option<Box<Node<K, V>>>, Box<Node<K, V>>);

impl<K, V> RankTree<K, V> {
    fn do_insert(node: Option<Box<Node<K, V>>>, key: K, value: V) -> Upsert<K, V>
    where
        K: Ord,
    {
        let mut node = match node {
            Some(node) => node,
            None => return (Box::new(Node::new(key, value)), None),
        };

        match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, rejected) = Self::do_insert(node.left.take(), key, value);
                node.left = Some(left);
                match rejected {
                    None => (rebalance(node), None),
                    rejected => (node, rejected),
                }
            }
            Ordering::Less => {
                let (right, rejected) = Self::do_insert(node.right.take(), key, value);
                node.right = Some(right);
                match rejected {
                    None => (rebalance(node), None),
                    rejected => (node, rejected),
                }
            }
            Ordering::Equal => (node, Some((key, value))),
        }
    }

    fn do_remove<Q>(node: Option<Box<Node<K, V>>>, key: &Q) -> Delete<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };

        match node.key.borrow().cmp(key) {
            Ordering::Greater => {
                let (left, entry) = Self::do_remove(node.left.take(), key);
                node.left = left;
                match entry {
                    None => (Some(node), None),
                    entry => (Some(rebalance(node)), entry),
                }
            }
            Ordering::Less => {
                let (right, entry) = Self::do_remove(node.right.take(), key);
                node.right = right;
                match entry {
                    None => (Some(node), None),
                    entry => (Some(rebalance(node)), entry),
                }
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // leaf, the subtree vanishes.
                (None, None) => (None, Some(node.into_entry())),
                // single child takes over the position.
                (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.into_entry())),
                // two children, in-order successor takes over key and value.
                (left, Some(right)) => {
                    let (right, mut successor) = Self::remove_min(right);
                    mem::swap(&mut node.key, &mut successor.key);
                    mem::swap(&mut node.value, &mut successor.value);
                    node.left = left;
                    node.right = right;
                    (Some(rebalance(node)), Some(successor.into_entry()))
                }
            },
        }
    }

    fn remove_min(mut node: Box<Node<K, V>>) -> Delmin<K, V> {
        match node.left.take() {
            None => {
                let right = node.right.take();
                (right, node)
            }
            Some(left) => {
                let (left, min) = Self::remove_min(left);
                node.left = left;
                (Some(rebalance(node)), min)
            }
        }
    }

    fn search<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        while let Some(nref) = node {
            node = match nref.key.borrow().cmp(key) {
                Ordering::Less => nref.as_right_ref(),
                Ordering::Greater => nref.as_left_ref(),
                Ordering::Equal => return Some(nref),
            };
        }
        None
    }

    // children of `node` in rank order, near side holds the lower ranks.
    #[inline]
    fn near<'a>(&self, node: &'a Node<K, V>) -> Option<&'a Node<K, V>> {
        match self.order {
            Order::Ascending => node.as_left_ref(),
            Order::Descending => node.as_right_ref(),
        }
    }

    #[inline]
    fn far<'a>(&self, node: &'a Node<K, V>) -> Option<&'a Node<K, V>> {
        match self.order {
            Order::Ascending => node.as_right_ref(),
            Order::Descending => node.as_left_ref(),
        }
    }

    fn select(&self, rank: usize) -> Result<&Node<K, V>> {
        let n = self.len();
        if rank == 0 || rank > n {
            return err_at!(RankOutOfRange, msg: "rank {} not in 1..={}", rank, n);
        }

        let (mut node, mut rank) = (self.root.as_deref(), rank);
        while let Some(nref) = node {
            let near = self.near(nref);
            let skip = node::rank(near);
            node = match (rank - 1).cmp(&skip) {
                Ordering::Equal => return Ok(nref),
                Ordering::Less => near,
                Ordering::Greater => {
                    rank -= skip + 1;
                    self.far(nref)
                }
            };
        }
        err_at!(Fatal, msg: "select(): rank cache out of sync, {}", rank)
    }

    // return (height, rank) of the validated subtree, every key in it
    // must lie strictly between `lower` and `upper` inherited from the
    // ancestors.
    fn validate_tree(
        node: Option<&Node<K, V>>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(usize, usize)>
    where
        K: Ord + fmt::Debug,
    {
        let node = match node {
            Some(node) => node,
            None => return Ok((0, 0)),
        };

        if let Some(lower) = lower {
            if node.key.le(lower) {
                return err_at!(Fatal, msg: "sort key:{:?} lower:{:?}", node.key, lower);
            }
        }
        if let Some(upper) = upper {
            if node.key.ge(upper) {
                return err_at!(Fatal, msg: "sort key:{:?} upper:{:?}", node.key, upper);
            }
        }

        let (left, right) = (node.as_left_ref(), node.as_right_ref());
        let (lheight, lrank) = Self::validate_tree(left, lower, Some(&node.key))?;
        let (rheight, rrank) = Self::validate_tree(right, Some(&node.key), upper)?;

        let height = 1 + cmp::max(lheight, rheight);
        if node.height != height {
            return err_at!(Fatal, msg: "height {} != {} at {:?}", node.height, height, node.key);
        }
        let rank = 1 + lrank + rrank;
        if node.rank != rank {
            return err_at!(Fatal, msg: "rank {} != {} at {:?}", node.rank, rank, node.key);
        }
        if lheight.max(rheight) - lheight.min(rheight) > 1 {
            return err_at!(Fatal, msg: "unbalanced {} {} at {:?}", lheight, rheight, node.key);
        }

        Ok((height, rank))
    }
}

impl<K, V> fmt::Debug for RankTree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for RankTree<K, V>
where
    K: Ord,
{
    /// Later duplicates of a key are dropped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> RankTree<K, V> {
        let mut index = RankTree::new();
        let mut n_dups = 0;
        for (key, value) in iter {
            if index.try_insert(key, value).is_err() {
                n_dups += 1;
            }
        }
        if n_dups > 0 {
            debug!("from_iter: dropped {} duplicate keys", n_dups);
        }
        index
    }
}

impl<'a, K, V> IntoIterator for &'a RankTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// In-order iterator over a [RankTree], refer to [RankTree::iter].
pub struct Iter<'a, K, V> {
    paths: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.paths.pop()?;
        build_iter(node.as_right_ref(), &mut self.paths);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

// push `node` and its chain of left children.
fn build_iter<'a, K, V>(mut node: Option<&'a Node<K, V>>, paths: &mut Vec<&'a Node<K, V>>) {
    while let Some(nref) = node {
        paths.push(nref);
        node = nref.as_left_ref();
    }
}

fn drain_tree<K, V>(node: Option<Box<Node<K, V>>>, entries: &mut Vec<(K, V)>) {
    if let Some(mut node) = node {
        drain_tree(node.left.take(), entries);
        let right = node.right.take();
        entries.push(node.into_entry());
        drain_tree(right, entries);
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
