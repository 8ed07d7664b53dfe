//! Height-balanced (AVL) binary search tree
//!
//! Every node owns its children. Insertion recurses down, then restores the
//! AVL invariant on the way back up with single or double rotations:
//! `|height(left) - height(right)| <= 1` at every node, with an empty
//! subtree having height -1.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{Display, Write};

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    height: i32,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            height: 0,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height<K, V>(link: &Link<K, V>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

/// Right child becomes the subtree root; it hands its left subtree over.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Left child becomes the subtree root; it hands its right subtree over.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let factor = node.balance_factor();
    if factor < -1 {
        // Right-heavy. A left-heavy right child needs the double rotation.
        if let Some(right) = node.right.take() {
            node.right = Some(if right.balance_factor() > 0 {
                rotate_right(right)
            } else {
                right
            });
        }
        rotate_left(node)
    } else if factor > 1 {
        if let Some(left) = node.left.take() {
            node.left = Some(if left.balance_factor() < 0 {
                rotate_left(left)
            } else {
                left
            });
        }
        rotate_right(node)
    } else {
        node
    }
}

/// Ordered map with O(log n) point lookup
#[derive(Clone, Debug)]
pub struct BalancedTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for BalancedTree<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, V> BalancedTree<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, replacing the value if the key is already present
    pub fn insert(&mut self, key: K, value: V) {
        let root = self.root.take();
        self.root = Some(Self::insert_at(root, key, value, &mut self.len));
    }

    fn insert_at(link: Link<K, V>, key: K, value: V, len: &mut usize) -> Box<Node<K, V>> {
        let Some(mut node) = link else {
            *len += 1;
            return Node::leaf(key, value);
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                node.left = Some(Self::insert_at(node.left.take(), key, value, len));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_at(node.right.take(), key, value, len));
            }
            Ordering::Equal => {
                node.value = value;
                return node;
            }
        }

        node.update_height();
        rebalance(node)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }
}

impl<K, V> BalancedTree<K, V> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root; -1 for an empty tree
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// In-order (ascending key) iteration
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Check the AVL invariant and stored heights at every node
    pub fn is_balanced(&self) -> bool {
        fn check<K, V>(link: &Link<K, V>) -> Option<i32> {
            let Some(node) = link else {
                return Some(-1);
            };
            let left = check(&node.left)?;
            let right = check(&node.right)?;
            let expected = 1 + left.max(right);
            ((left - right).abs() <= 1 && node.height == expected).then_some(expected)
        }
        check(&self.root).is_some()
    }
}

impl<K: Display, V: Display> BalancedTree<K, V> {
    /// Pre-order dump: the root, then each node's children before descending
    pub fn print_tree(&self) -> String {
        let mut out = String::new();
        let Some(root) = self.root.as_deref() else {
            out.push_str("Tree is empty\n");
            return out;
        };
        let _ = writeln!(out, "root node: key={} value={}", root.key, root.value);
        Self::print_node(root, &mut out);
        out
    }

    fn print_node(node: &Node<K, V>, out: &mut String) {
        if let Some(left) = node.left.as_deref() {
            let _ = writeln!(
                out,
                "left of node ({}): key={} value={}",
                node.key, left.key, left.value
            );
        }
        if let Some(right) = node.right.as_deref() {
            let _ = writeln!(
                out,
                "right of node ({}): key={} value={}",
                node.key, right.key, right.value
            );
        }
        if let Some(left) = node.left.as_deref() {
            Self::print_node(left, out);
        }
        if let Some(right) = node.right.as_deref() {
            Self::print_node(right, out);
        }
    }
}

/// In-order iterator over a [`BalancedTree`]
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut tree = BalancedTree::new();
        tree.insert("m".to_string(), 1);
        tree.insert("c".to_string(), 2);
        tree.insert("x".to_string(), 3);

        assert_eq!(tree.get("m"), Some(&1));
        assert_eq!(tree.get("c"), Some(&2));
        assert_eq!(tree.get("x"), Some(&3));
        assert_eq!(tree.get("q"), None);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut tree = BalancedTree::new();
        tree.insert(5, "old");
        tree.insert(5, "new");
        assert_eq!(tree.get(&5), Some(&"new"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_empty_tree() {
        let tree: BalancedTree<i32, i32> = BalancedTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.get(&1), None);
        assert_eq!(tree.print_tree(), "Tree is empty\n");
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let mut tree = BalancedTree::new();
        for i in 0..1023 {
            tree.insert(i, i);
        }
        // A perfect tree of 1023 nodes has height 9.
        assert_eq!(tree.height(), 9);
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_descending_inserts_stay_balanced() {
        let mut tree = BalancedTree::new();
        for i in (0..500).rev() {
            tree.insert(i, ());
        }
        assert!(tree.is_balanced());
        assert!(tree.height() <= 12);
    }

    #[test]
    fn test_double_rotations() {
        // Right-left case.
        let mut tree = BalancedTree::new();
        for k in [10, 30, 20] {
            tree.insert(k, k * 2);
        }
        assert_eq!(tree.height(), 1);
        assert_eq!(
            tree.print_tree(),
            "root node: key=20 value=40\n\
             left of node (20): key=10 value=20\n\
             right of node (20): key=30 value=60\n"
        );

        // Left-right case.
        let mut tree = BalancedTree::new();
        for k in [30, 10, 20] {
            tree.insert(k, k);
        }
        assert_eq!(tree.height(), 1);
        assert!(tree.is_balanced());
        assert!(tree.print_tree().starts_with("root node: key=20 value=20\n"));
    }

    #[test]
    fn test_iter_in_order() {
        let mut tree = BalancedTree::new();
        for k in [50, 20, 80, 10, 30, 70, 90, 60] {
            tree.insert(k, k * 2);
        }
        let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![10, 20, 30, 50, 60, 70, 80, 90]);
        let (_, v) = tree.iter().next().unwrap();
        assert_eq!(*v, 20);
    }

    #[test]
    fn test_print_tree_pre_order() {
        let mut tree = BalancedTree::new();
        for k in ["b", "a", "c"] {
            tree.insert(k, k.to_uppercase());
        }
        let expected = "root node: key=b value=B\n\
                        left of node (b): key=a value=A\n\
                        right of node (b): key=c value=C\n";
        assert_eq!(tree.print_tree(), expected);
    }
}
