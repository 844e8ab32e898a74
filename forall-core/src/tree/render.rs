//! Tree rendering for inspecting shrink trees while debugging generators.

use super::Tree;
use std::fmt::Debug;

impl<T> Tree<T>
where
    T: Debug + Clone + 'static,
{
    /// Render the shrink tree down to `max_depth` levels.
    ///
    /// Trees are lazy and may be very wide, so the depth bound is mandatory.
    pub fn render(&self, max_depth: usize) -> String {
        let mut result = String::new();
        self.render_recursive(&mut result, "", true, max_depth);
        result
    }

    fn render_recursive(&self, result: &mut String, prefix: &str, is_last: bool, depth: usize) {
        result.push_str(prefix);
        if is_last {
            result.push_str("└── ");
        } else {
            result.push_str("├── ");
        }
        result.push_str(&format!("{:?}\n", self.value));

        if depth == 0 {
            return;
        }

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let children = self.children();
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            child.render_recursive(result, &child_prefix, i + 1 == count, depth - 1);
        }
    }

    /// Render one level compactly: the value followed by its candidates.
    pub fn render_compact(&self) -> String {
        let shrinks = self.shrinks();
        if shrinks.is_empty() {
            format!("{:?}", self.value)
        } else {
            let rendered: Vec<String> = shrinks.iter().map(|s| format!("{s:?}")).collect();
            format!("{:?} -> [{}]", self.value, rendered.join(", "))
        }
    }
}
