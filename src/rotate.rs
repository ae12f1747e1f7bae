//! Rotation routines for AVL rebalancing.
//!
//! Every routine consumes the root of a subtree and returns the new root,
//! the caller re-attaches it in place of the old one. Cached height and
//! rank are recomputed for the demoted node first and then for the
//! promoted node. In-order sequence of keys is never changed.

use log::trace;

use crate::node::Node;

/// Restore AVL balance at `node`, assuming both its subtrees are balanced
/// and differ in height by at most 2. Refreshes the cached fields of
/// `node` before evaluating its balance factor.
pub(crate) fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update();

    let bf = node.balance_factor();
    if bf > 1 {
        // left heavy, a missing child cannot be the heavy side.
        let heavy = node.as_left_ref().map_or(0, Node::balance_factor);
        if heavy >= 0 {
            rotate_right(node)
        } else {
            rotate_left_right(node)
        }
    } else if bf < -1 {
        let heavy = node.as_right_ref().map_or(0, Node::balance_factor);
        if heavy <= 0 {
            rotate_left(node)
        } else {
            rotate_right_left(node)
        }
    } else {
        node
    }
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    \                    /   \
//            /      \                  /     \
//          left       x             node      xr
//                    / \            /  \
//                  xl   xr       left   xl
//
pub(crate) fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = match node.right.take() {
        Some(x) => x,
        None => panic!("rotate_left(): missing right child ? Call the programmer"),
    };
    trace!("rotate_left height:{} rank:{}", node.height, node.rank);

    node.right = x.left.take();
    node.update();
    x.left = Some(node);
    x.update();
    x
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    \                    /   \
//            /      \                  /     \
//          x       right             xl      node
//         / \                                / \
//       xl   xr                             xr  right
//
pub(crate) fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut x = match node.left.take() {
        Some(x) => x,
        None => panic!("rotate_right(): missing left child ? Call the programmer"),
    };
    trace!("rotate_right height:{} rank:{}", node.height, node.rank);

    node.left = x.right.take();
    node.update();
    x.right = Some(node);
    x.update();
    x
}

//              node                     node                  y
//              /  \                     /  \                /   \
//             x    d                   y    d              x    node
//            / \           =>         / \        =>       / \   /  \
//           a   y                    x   c               a   b c    d
//              / \                  / \
//             b   c                a   b
//
pub(crate) fn rotate_left_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

//              node                    node                     y
//              /  \                    /  \                   /   \
//             a    x                  a    y                node    x
//                 / \      =>             / \      =>       / \    / \
//                y   d                   b   x             a   b  c   d
//               / \                         / \
//              b   c                       c   d
//
pub(crate) fn rotate_right_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

#[cfg(test)]
#[path = "rotate_test.rs"]
mod rotate_test;
