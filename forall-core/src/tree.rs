//! Lazy rose trees carrying a generated value and its shrinks.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

pub mod render;

type Children<T> = Rc<dyn Fn() -> Vec<Tree<T>>>;

/// A rose tree containing a value and its shrink possibilities.
///
/// Children are computed on demand each time [`Tree::children`] is called,
/// so the shrink sequence is restartable and never materialized in full.
/// Every child holds a value strictly smaller than its parent under the
/// order of the generator that built the tree; descending always ends.
pub struct Tree<T> {
    pub value: T,
    children: Children<T>,
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Tree<T> {
    /// Create a new tree with the given value and no children.
    pub fn singleton(value: T) -> Self {
        Tree {
            value,
            children: Rc::new(Vec::new),
        }
    }

    /// Create a tree whose children are produced on demand.
    pub fn lazy<F>(value: T, children: F) -> Self
    where
        F: Fn() -> Vec<Tree<T>> + 'static,
    {
        Tree {
            value,
            children: Rc::new(children),
        }
    }

    /// Create a new tree with the given value and fixed children.
    pub fn with_children(value: T, children: Vec<Tree<T>>) -> Self
    where
        T: Clone,
    {
        Tree::lazy(value, move || children.clone())
    }

    /// The immediate shrink candidates, smallest-first preference order.
    pub fn children(&self) -> Vec<Tree<T>> {
        (self.children)()
    }

    /// Map a function over the tree values, shrinks included.
    pub fn map<U, F>(self, f: F) -> Tree<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        self.map_rc(Rc::new(f))
    }

    fn map_rc<U: 'static>(self, f: Rc<dyn Fn(T) -> U>) -> Tree<U> {
        let Tree { value, children } = self;
        let value = f(value);
        Tree {
            value,
            children: Rc::new(move || {
                children()
                    .into_iter()
                    .map(|child| child.map_rc(Rc::clone(&f)))
                    .collect()
            }),
        }
    }

    /// Dependent composition.
    ///
    /// The resulting tree first tries shrinking the outer value (rebuilding
    /// the inner tree through `f`), then the inner tree's own shrinks.
    /// An error at the root is returned; outer shrinks for which `f` fails
    /// are skipped.
    pub fn bind<U, E, F>(self, f: F) -> Result<Tree<U>, E>
    where
        F: Fn(&T) -> Result<Tree<U>, E> + 'static,
        U: 'static,
        E: 'static,
    {
        self.bind_rc(Rc::new(f))
    }

    fn bind_rc<U: 'static, E: 'static>(
        self,
        f: Rc<dyn Fn(&T) -> Result<Tree<U>, E>>,
    ) -> Result<Tree<U>, E> {
        let Tree {
            value: inner_value,
            children: inner_children,
        } = f(&self.value)?;
        let outer = self.children;

        Ok(Tree {
            value: inner_value,
            children: Rc::new(move || {
                let mut result: Vec<Tree<U>> = outer()
                    .into_iter()
                    .filter_map(|child| child.bind_rc(Rc::clone(&f)).ok())
                    .collect();
                result.extend(inner_children());
                result
            }),
        })
    }

    /// Filter the tree, keeping only values that satisfy the predicate.
    pub fn filter<F>(self, predicate: F) -> Option<Tree<T>>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_rc(Rc::new(predicate))
    }

    fn filter_rc(self, predicate: Rc<dyn Fn(&T) -> bool>) -> Option<Tree<T>> {
        if !predicate(&self.value) {
            return None;
        }

        let children = self.children;
        Some(Tree {
            value: self.value,
            children: Rc::new(move || {
                children()
                    .into_iter()
                    .filter_map(|child| child.filter_rc(Rc::clone(&predicate)))
                    .collect()
            }),
        })
    }

    /// Get the value from the tree.
    pub fn outcome(&self) -> &T {
        &self.value
    }

    /// Check if the tree has any children (shrinks).
    pub fn has_shrinks(&self) -> bool {
        !self.children().is_empty()
    }
}

impl<T: Clone + 'static> Tree<T> {
    /// Build a tree by repeatedly applying a shrink function.
    ///
    /// `shrink` must only return values smaller than its input, otherwise the
    /// tree is infinite.
    pub fn unfold<F>(value: T, shrink: F) -> Self
    where
        F: Fn(&T) -> Vec<T> + 'static,
    {
        Self::unfold_rc(value, Rc::new(shrink))
    }

    fn unfold_rc(value: T, shrink: Rc<dyn Fn(&T) -> Vec<T>>) -> Self {
        let current = value.clone();
        Tree {
            value,
            children: Rc::new(move || {
                shrink(&current)
                    .into_iter()
                    .map(|child| Tree::unfold_rc(child, Rc::clone(&shrink)))
                    .collect()
            }),
        }
    }

    /// Values of the immediate shrink candidates.
    pub fn shrinks(&self) -> Vec<T> {
        self.children().into_iter().map(|child| child.value).collect()
    }

    /// Collect values breadth-first down to `max_depth` levels of shrinking.
    pub fn expand(&self, max_depth: usize) -> Vec<T> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back((self.clone(), 0));

        while let Some((tree, depth)) = queue.pop_front() {
            if depth < max_depth {
                for child in tree.children() {
                    queue.push_back((child, depth + 1));
                }
            }
            result.push(tree.value);
        }

        result
    }

    /// Pair two trees; shrinks the left side first, one side per step.
    pub fn zip<U: Clone + 'static>(left: Tree<T>, right: Tree<U>) -> Tree<(T, U)> {
        let value = (left.value.clone(), right.value.clone());
        Tree::lazy(value, move || {
            let mut result: Vec<Tree<(T, U)>> = left
                .children()
                .into_iter()
                .map(|l| Tree::zip(l, right.clone()))
                .collect();
            result.extend(
                right
                    .children()
                    .into_iter()
                    .map(|r| Tree::zip(left.clone(), r)),
            );
            result
        })
    }

    /// A fixed-length sequence; shrinks exactly one element per step.
    pub fn sequence(elements: Vec<Tree<T>>) -> Tree<Vec<T>> {
        let value = elements.iter().map(|tree| tree.value.clone()).collect();
        Tree::lazy(value, move || element_shrinks(&elements, Tree::sequence))
    }

    /// A variable-length list.
    ///
    /// Removing a single element comes first (earliest index first), then
    /// shrinking one element in place. No step changes the length by more
    /// than one.
    pub fn list(elements: Vec<Tree<T>>) -> Tree<Vec<T>> {
        let value = elements.iter().map(|tree| tree.value.clone()).collect();
        Tree::lazy(value, move || {
            let mut result: Vec<Tree<Vec<T>>> = (0..elements.len())
                .map(|skip| {
                    let rest = elements
                        .iter()
                        .enumerate()
                        .filter(|&(index, _)| index != skip)
                        .map(|(_, tree)| tree.clone())
                        .collect();
                    Tree::list(rest)
                })
                .collect();
            result.extend(element_shrinks(&elements, Tree::list));
            result
        })
    }

    /// A variable-length run that shrinks by truncation.
    ///
    /// Prefixes come first, halving the length toward empty, then single
    /// elements shrink in place.
    pub fn prefixes(elements: Vec<Tree<T>>) -> Tree<Vec<T>> {
        let value = elements.iter().map(|tree| tree.value.clone()).collect();
        Tree::lazy(value, move || {
            let len = elements.len() as i64;
            let mut result: Vec<Tree<Vec<T>>> = towards(0, len)
                .into_iter()
                .map(|keep| Tree::prefixes(elements[..keep as usize].to_vec()))
                .collect();
            result.extend(element_shrinks(&elements, Tree::prefixes));
            result
        })
    }
}

fn element_shrinks<T, F>(elements: &[Tree<T>], rebuild: F) -> Vec<Tree<Vec<T>>>
where
    T: Clone + 'static,
    F: Fn(Vec<Tree<T>>) -> Tree<Vec<T>>,
{
    let mut result = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        for child in element.children() {
            let mut replaced = elements.to_vec();
            replaced[index] = child;
            result.push(rebuild(replaced));
        }
    }
    result
}

/// Candidates moving `value` toward `target`, halving the distance.
///
/// The target itself comes first, then values ever closer to `value`. Every
/// candidate is strictly closer to `target` than `value` is.
pub fn towards(target: i64, value: i64) -> Vec<i64> {
    let distance = value as i128 - target as i128;
    let mut result = Vec::new();
    let mut step = distance;

    while step != 0 {
        let candidate = (value as i128 - step) as i64;
        if result.last() != Some(&candidate) {
            result.push(candidate);
        }
        step /= 2;
    }

    result
}

impl<T: Clone + 'static> From<T> for Tree<T> {
    fn from(value: T) -> Self {
        Tree::singleton(value)
    }
}
