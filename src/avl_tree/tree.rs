use crate::avl_tree::node::Node;
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn height<T>(tree: &Tree<T>) -> i32 {
    match tree {
        None => -1,
        Some(ref node) => node.height,
    }
}

// right child becomes the root of the subtree
fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    trace!("rotating left at subtree of height {}", node.height);
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

// left child becomes the root of the subtree
fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    trace!("rotating right at subtree of height {}", node.height);
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// left-heavy subtree whose left child leans right
fn rotate_left_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

// right-heavy subtree whose right child leans left
fn rotate_right_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

// precondition: the heights of both children of the root are correct
fn balance<T>(tree: &mut Tree<T>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        let leans_inward = node.left.as_ref().map_or(false, |child| child.balance() < 0);
        node = if leans_inward {
            rotate_left_right(node)
        } else {
            rotate_right(node)
        };
    } else if node.balance() < -1 {
        let leans_inward = node.right.as_ref().map_or(false, |child| child.balance() > 0);
        node = if leans_inward {
            rotate_right_left(node)
        } else {
            rotate_left(node)
        };
    }

    node.update();
    *tree = Some(node);
}

// precondition: the tree is not empty
fn remove_min<T>(tree: &mut Tree<T>) -> Box<Node<T>> {
    let mut node = match tree.take() {
        Some(node) => node,
        None => unreachable!(),
    };

    if node.left.is_some() {
        let min = remove_min(&mut node.left);
        *tree = Some(node);
        balance(tree);
        min
    } else {
        *tree = node.right.take();
        node
    }
}

pub fn insert<T>(tree: &mut Tree<T>, value: T) -> bool
where
    T: Ord,
{
    let inserted = match tree {
        Some(ref mut node) => match value.cmp(&node.value) {
            Ordering::Less => insert(&mut node.left, value),
            Ordering::Greater => insert(&mut node.right, value),
            Ordering::Equal => return false,
        },
        None => {
            *tree = Some(Box::new(Node::new(value)));
            return true;
        },
    };

    balance(tree);
    inserted
}

pub fn remove<T, V>(tree: &mut Tree<T>, value: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let ret = match tree.take() {
        Some(mut node) => match value.cmp(node.value.borrow()) {
            Ordering::Less => {
                let ret = remove(&mut node.left, value);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, value);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                if node.left.is_some() && node.right.is_some() {
                    let Node { value: successor, .. } = *remove_min(&mut node.right);
                    let ret = mem::replace(&mut node.value, successor);
                    *tree = Some(node);
                    Some(ret)
                } else {
                    let Node { value: removed, left, right, .. } = *node;
                    *tree = left.or(right);
                    Some(removed)
                }
            },
        },
        None => return None,
    };

    balance(tree);
    ret
}

pub fn contains<T, V>(tree: &Tree<T>, value: &V) -> bool
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(ref node) = curr {
        match value.cmp(node.value.borrow()) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return true,
        }
    }
    false
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.value
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.value
    })
}

#[cfg(test)]
pub fn len<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => len(&node.left) + 1 + len(&node.right),
    }
}

/// Destroys every node in post-order and returns how many were destroyed.
pub fn clear<T>(tree: &mut Tree<T>) -> usize {
    match tree.take() {
        Some(mut node) => {
            let destroyed = clear(&mut node.left) + clear(&mut node.right);
            drop(node);
            destroyed + 1
        },
        None => 0,
    }
}

/// Panics if any node is out of order, carries a stale height, or is unbalanced. Returns the
/// height of the tree.
#[cfg(test)]
pub fn check_invariants<T>(tree: &Tree<T>) -> i32
where
    T: Ord,
{
    fn check<'a, T: Ord>(tree: &'a Tree<T>, lower: Option<&'a T>, upper: Option<&'a T>) -> i32 {
        match tree {
            None => -1,
            Some(ref node) => {
                if let Some(lower) = lower {
                    assert!(*lower < node.value, "value out of order");
                }
                if let Some(upper) = upper {
                    assert!(node.value < *upper, "value out of order");
                }
                let left_height = check(&node.left, lower, Some(&node.value));
                let right_height = check(&node.right, Some(&node.value), upper);
                assert_eq!(node.height, left_height.max(right_height) + 1);
                assert!((left_height - right_height).abs() <= 1);
                node.height
            },
        }
    }

    check(tree, None, None)
}
