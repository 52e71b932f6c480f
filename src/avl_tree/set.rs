use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::error::{Error, Result};
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::io::Write;
use std::iter::FromIterator;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Values are their own keys, so
/// inserting a value that is already present leaves the set unchanged.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.height(), 1);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.max(), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct AvlSet<T> {
    tree: tree::Tree<T>,
    len: usize,
}

impl<T> AvlSet<T> {
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        AvlSet { tree: None, len: 0 }
    }

    /// Inserts a value into the set. Returns `false` and leaves the set untouched if the value
    /// already exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let inserted = tree::insert(&mut self.tree, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes a value from the set. If the value exists in the set, it will return the removed
    /// value. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, value: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let ret = tree::remove(&mut self.tree, value);
        if ret.is_some() {
            self.len -= 1;
        }
        ret
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, value: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::contains(&self.tree, value)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Returns the height of the tree backing the set. A single element has a height of `0` and
    /// an empty set has a height of `-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.height(), -1);
    /// set.insert(1);
    /// assert_eq!(set.height(), 0);
    /// ```
    pub fn height(&self) -> i32 {
        tree::height(&self.tree)
    }

    /// Clears the set, destroying every node in post-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        let destroyed = tree::clear(&mut self.tree);
        debug!("cleared avl set, destroyed {} nodes", destroyed);
        self.len = 0;
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree)
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree)
    }

    /// Returns the minimum value of the set, failing with `Error::EmptyTree` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.find_min().is_err());
    /// set.insert(2);
    /// assert_eq!(set.find_min().unwrap(), &2);
    /// ```
    pub fn find_min(&self) -> Result<&T> {
        self.min().ok_or(Error::EmptyTree)
    }

    /// Returns the maximum value of the set, failing with `Error::EmptyTree` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.find_max().is_err());
    /// set.insert(2);
    /// assert_eq!(set.find_max().unwrap(), &2);
    /// ```
    pub fn find_max(&self) -> Result<&T> {
        self.max().ok_or(Error::EmptyTree)
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<T> {
        AvlSetIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Returns an iterator over the set that yields each node's value before the values of its
    /// left subtree and then its right subtree. Calling it again restarts the traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// for value in 1..4 {
    ///     set.insert(value);
    /// }
    ///
    /// assert_eq!(set.pre_order().collect::<Vec<&u32>>(), vec![&2, &1, &3]);
    /// ```
    pub fn pre_order(&self) -> PreOrderIter<T> {
        PreOrderIter {
            stack: self.tree.iter().map(|node| &**node).collect(),
        }
    }

    /// Writes every value of the set to `out` in pre-order, each followed by a single space.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// for value in 1..4 {
    ///     set.insert(value);
    /// }
    ///
    /// let mut out: Vec<u8> = Vec::new();
    /// set.print_pre_order(&mut out).unwrap();
    /// assert_eq!(out, b"2 1 3 ");
    /// ```
    pub fn print_pre_order<W>(&self, out: &mut W) -> Result<()>
    where
        T: fmt::Display,
        W: Write,
    {
        for value in self.pre_order() {
            write!(out, "{} ", value)?;
        }
        Ok(())
    }
}

impl<T> IntoIterator for AvlSet<T> {
    type IntoIter = AvlSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a,
{
    type IntoIter = AvlSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct AvlSetIntoIter<T> {
    current: tree::Tree<T>,
    stack: Vec<Node<T>>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { value, right, .. } = node;
            self.current = right;
            value
        })
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            &node.value
        })
    }
}

/// A pre-order iterator for `AvlSet<T>`.
///
/// This iterator yields a node's value, then the values of its left subtree, then the values of
/// its right subtree.
pub struct PreOrderIter<'a, T>
where
    T: 'a,
{
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for PreOrderIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().map(|node| {
            if let Some(ref right) = node.right {
                self.stack.push(right);
            }
            if let Some(ref left) = node.left {
                self.stack.push(left);
            }
            &node.value
        })
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for AvlSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> fmt::Debug for AvlSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::AvlSet;
    use crate::avl_tree::tree;
    use crate::error::Error;
    use rand::{Rng, SeedableRng, XorShiftRng};
    use std::collections::BTreeSet;

    fn pre_order(set: &AvlSet<u32>) -> Vec<u32> {
        set.pre_order().cloned().collect()
    }

    #[test]
    fn test_len_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_height_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.height(), -1);
    }

    #[test]
    fn test_min_max_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
        match set.find_min() {
            Err(Error::EmptyTree) => {},
            _ => panic!("expected an empty tree error"),
        }
        match set.find_max() {
            Err(Error::EmptyTree) => {},
            _ => panic!("expected an empty tree error"),
        }
    }

    #[test]
    fn test_insert() {
        let mut set = AvlSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
        assert_eq!(set.height(), 0);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = AvlSet::new();
        for value in &[2, 1, 3] {
            set.insert(*value);
        }
        let before = pre_order(&set);
        assert!(!set.insert(1));
        assert_eq!(set.len(), 3);
        assert_eq!(pre_order(&set), before);
    }

    #[test]
    fn test_remove() {
        let mut set = AvlSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_missing() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(2);
        let before = pre_order(&set);
        assert_eq!(set.remove(&3), None);
        assert_eq!(set.len(), 2);
        assert_eq!(pre_order(&set), before);
    }

    #[test]
    fn test_min_max() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
        assert_eq!(set.find_min().unwrap(), &1);
        assert_eq!(set.find_max().unwrap(), &5);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut set = AvlSet::new();
        set.insert(String::from("b"));
        set.insert(String::from("a"));
        assert!(set.contains("a"));
        assert_eq!(set.remove("b"), Some(String::from("b")));
        assert!(!set.contains("b"));
    }

    #[test]
    fn test_clear() {
        let mut set = AvlSet::new();
        for value in 0..100 {
            set.insert(value);
        }
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.height(), -1);

        set.insert(1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.height(), 0);
    }

    #[test]
    fn test_pre_order_restarts() {
        let set: AvlSet<u32> = (1..8).collect();
        let first = pre_order(&set);
        let second = pre_order(&set);
        assert_eq!(first, vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_print_pre_order() {
        let mut set = AvlSet::new();
        for value in &[5, 3, 8, 1, 4, 7, 9] {
            set.insert(*value);
        }
        let mut out: Vec<u8> = Vec::new();
        set.print_pre_order(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "5 3 1 4 8 7 9 ");
    }

    #[test]
    fn test_into_iter() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = AvlSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_debug() {
        let set: AvlSet<u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(format!("{:?}", set), "{1, 2, 3}");
    }

    #[test]
    fn test_random_operations_keep_invariants() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut set = AvlSet::new();
        let mut expected = BTreeSet::new();

        for _ in 0..5000 {
            let value = rng.gen_range(0, 500u32);
            if rng.gen::<bool>() {
                assert_eq!(set.insert(value), expected.insert(value));
            } else {
                assert_eq!(set.remove(&value).is_some(), expected.remove(&value));
            }
            assert_eq!(tree::check_invariants(&set.tree), set.height());
            assert_eq!(tree::len(&set.tree), set.len());
            assert_eq!(set.len(), expected.len());
        }

        assert_eq!(set.iter().collect::<Vec<&u32>>(), expected.iter().collect::<Vec<&u32>>());
        assert_eq!(set.min(), expected.iter().next());
        assert_eq!(set.max(), expected.iter().next_back());
    }

    #[test]
    fn test_remove_every_value_keeps_invariants() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([2, 3, 5, 7]);
        let mut values: Vec<u32> = (0..1000).collect();
        rng.shuffle(&mut values);

        let mut set: AvlSet<u32> = values.iter().cloned().collect();
        rng.shuffle(&mut values);

        for value in &values {
            assert_eq!(set.remove(value), Some(*value));
            tree::check_invariants(&set.tree);
        }
        assert!(set.is_empty());
        assert_eq!(set.height(), -1);
    }
}
