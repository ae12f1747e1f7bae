use std::cmp;

/// Node corresponds to a single entry in a [RankTree](crate::RankTree).
///
/// Besides key and value, every node caches the height of its subtree and
/// the number of nodes in its subtree, called its rank. Both are refreshed
/// from the children after every structural change, refer to
/// [Node::to_height] and [Node::to_rank].
#[derive(Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) height: usize,                 // cache: height of subtree
    pub(crate) rank: usize,                   // cache: number of nodes in subtree
    pub(crate) left: Option<Box<Node<K, V>>>,  // store: left child
    pub(crate) right: Option<Box<Node<K, V>>>, // store: right child
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Node<K, V> {
        Node {
            key,
            value,
            height: 1,
            rank: 1,
            left: None,
            right: None,
        }
    }

    /// Return the key of this entry.
    #[inline]
    pub fn as_key(&self) -> &K {
        &self.key
    }

    /// Return the value of this entry.
    #[inline]
    pub fn as_value(&self) -> &V {
        &self.value
    }

    /// Height of the subtree rooted at this node, a leaf has height 1.
    #[inline]
    pub fn to_height(&self) -> usize {
        self.height
    }

    /// Number of nodes in the subtree rooted at this node.
    #[inline]
    pub fn to_rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub(crate) fn as_left_ref(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    #[inline]
    pub(crate) fn as_right_ref(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    /// Recompute height and rank from the children. Children must be
    /// up to date.
    #[inline]
    pub(crate) fn update(&mut self) {
        let (left, right) = (self.left.as_deref(), self.right.as_deref());
        let h = 1 + cmp::max(height(left), height(right));
        let r = 1 + rank(left) + rank(right);
        self.height = h;
        self.rank = r;
    }

    /// height(left) - height(right), from the cached heights.
    #[inline]
    pub(crate) fn balance_factor(&self) -> isize {
        (height(self.as_left_ref()) as isize) - (height(self.as_right_ref()) as isize)
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[inline]
pub(crate) fn height<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.height)
}

#[inline]
pub(crate) fn rank<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.rank)
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
