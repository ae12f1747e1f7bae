//! Linear time construction of [RankTree] from sorted input.
//!
//! Two flavours:
//!
//! * [RankTree::from_sorted] picks the middle entry of every sub-slice as
//!   the subtree root.
//! * [RankTree::with_shape] builds a complete tree of placeholder entries,
//!   prunes the surplus bottom leaves from the right, and
//!   [RankTree::relabel] later assigns the real entries in key order.
//!
//! Both produce an AVL balanced tree without a single rotation, and both
//! validate input before touching the tree.

use log::debug;

use std::vec;

use crate::{node::Node, order::Order, tree::RankTree, Error, Result};

impl<K, V> RankTree<K, V> {
    /// Build a tree from `keys` sorted in strictly ascending order, and
    /// their `values`. Fails with `InvalidInput` if keys are not sorted or
    /// if both vectors differ in length.
    ///
    /// ```
    /// use ranktree::RankTree;
    ///
    /// let index = RankTree::from_sorted(vec![1, 2, 3], vec!["a", "b", "c"]).unwrap();
    /// assert_eq!(index.len(), 3);
    /// assert_eq!(index.get(&2), Some(&"b"));
    ///
    /// assert!(RankTree::from_sorted(vec![2, 1], vec![(), ()]).is_err());
    /// ```
    pub fn from_sorted(keys: Vec<K>, values: Vec<V>) -> Result<RankTree<K, V>>
    where
        K: Ord,
    {
        if keys.len() != values.len() {
            return err_at!(
                InvalidInput, msg: "{} keys for {} values", keys.len(), values.len()
            );
        }
        check_ascending(&keys)?;

        let n = keys.len();
        let mut entries = keys.into_iter().zip(values.into_iter());
        let root = build_sorted(n, &mut entries);
        debug!("from_sorted: built {} entries", n);

        Ok(RankTree {
            root,
            order: Order::Ascending,
        })
    }

    /// Build a tree of `n` placeholder entries, shaped as a complete
    /// binary tree whose surplus bottom leaves are pruned from the right.
    /// Keys and values are their defaults, refer to [RankTree::relabel]
    /// for filling them in.
    pub fn with_shape(n: usize) -> RankTree<K, V>
    where
        K: Default,
        V: Default,
    {
        // levels of a complete tree with room for `n` nodes.
        let levels = (usize::BITS - n.leading_zeros()) as usize;
        let mut root = build_complete(levels);

        let mut excess = match levels {
            0 => 0,
            levels => ((1_usize << levels) - 1) - n,
        };
        prune(&mut root, &mut excess);
        debug!("with_shape: {} nodes in {} levels", n, levels);

        RankTree {
            root,
            order: Order::Ascending,
        }
    }

    /// Assign `entries` to the existing nodes by an in-order walk, the
    /// shape of the tree is not touched. Entries must be sorted in
    /// strictly ascending key order and must be exactly `len()` in
    /// number, else `InvalidInput` is returned and the tree is untouched.
    pub fn relabel<I>(&mut self, entries: I) -> Result<()>
    where
        K: Ord,
        I: IntoIterator<Item = (K, V)>,
    {
        let (keys, values): (Vec<K>, Vec<V>) = entries.into_iter().unzip();
        if keys.len() != self.len() {
            return err_at!(
                InvalidInput, msg: "{} entries for {} nodes", keys.len(), self.len()
            );
        }
        check_ascending(&keys)?;

        let mut entries = keys.into_iter().zip(values.into_iter());
        relabel_tree(self.root.as_deref_mut(), &mut entries);
        Ok(())
    }
}

type Entries<K, V> = std::iter::Zip<vec::IntoIter<K>, vec::IntoIter<V>>;

fn check_ascending<K>(keys: &[K]) -> Result<()>
where
    K: Ord,
{
    match keys.windows(2).position(|w| w[0] >= w[1]) {
        Some(off) => err_at!(InvalidInput, msg: "keys not ascending at index {}", off + 1),
        None => Ok(()),
    }
}

// consume the next `n` entries, middle one becomes the root.
fn build_sorted<K, V>(n: usize, entries: &mut Entries<K, V>) -> Option<Box<Node<K, V>>> {
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    let left = build_sorted(mid, entries);
    let (key, value) = entries.next()?;
    let right = build_sorted(n - mid - 1, entries);

    let mut node = Box::new(Node::new(key, value));
    node.left = left;
    node.right = right;
    node.update();
    Some(node)
}

fn build_complete<K, V>(levels: usize) -> Option<Box<Node<K, V>>>
where
    K: Default,
    V: Default,
{
    if levels == 0 {
        return None;
    }

    let mut node = Box::new(Node::new(K::default(), V::default()));
    node.left = build_complete(levels - 1);
    node.right = build_complete(levels - 1);
    node.update();
    Some(node)
}

// remove `excess` leaves in reverse in-order, only leaves of the bottom
// level are reached before `excess` drops to zero.
fn prune<K, V>(slot: &mut Option<Box<Node<K, V>>>, excess: &mut usize) {
    if *excess == 0 {
        return;
    }
    let node = match slot.as_mut() {
        Some(node) => node,
        None => return,
    };

    prune(&mut node.right, excess);
    if node.left.is_none() && node.right.is_none() {
        *slot = None;
        *excess -= 1;
        return;
    }
    prune(&mut node.left, excess);
    node.update();
}

fn relabel_tree<K, V>(node: Option<&mut Node<K, V>>, entries: &mut Entries<K, V>) {
    if let Some(node) = node {
        relabel_tree(node.left.as_deref_mut(), entries);
        if let Some((key, value)) = entries.next() {
            node.key = key;
            node.value = value;
        }
        relabel_tree(node.right.as_deref_mut(), entries);
    }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod build_test;
