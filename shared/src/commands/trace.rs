use std::collections::VecDeque;
use std::fmt;

/// One labeled step in the encoding of a command, with the steps nested
/// under it. Mirrors the payload's structure so a divergence report can say
/// which field a peer disagreed on, not just which byte.
#[derive(Debug, Clone)]
pub struct TraceNode {
    label: String,
    children: Vec<TraceNode>,
}

impl TraceNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: TraceNode) {
        self.children.push(child);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[TraceNode] {
        &self.children
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        writeln!(f, "{}", self.label)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TraceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// A bounded history of encode traces, oldest first. When peers diverge,
/// the last few traces from each side are usually enough to find the field
/// that differed.
pub struct TraceLog {
    roots: VecDeque<TraceNode>,
    capacity: usize,
}

impl TraceLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            roots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, root: TraceNode) {
        if self.roots.len() == self.capacity {
            self.roots.pop_front();
        }
        self.roots.push_back(root);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceNode> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_indents_children() {
        let mut root = TraceNode::new("root");
        let mut inner = TraceNode::new("inner");
        inner.add_child(TraceNode::new("leaf"));
        root.add_child(inner);

        assert_eq!(root.to_string(), "root\n  inner\n    leaf\n");
    }

    #[test]
    fn log_evicts_oldest() {
        let mut log = TraceLog::new(2);
        log.append(TraceNode::new("a"));
        log.append(TraceNode::new("b"));
        log.append(TraceNode::new("c"));

        let labels: Vec<&str> = log.iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["b", "c"]);
    }
}
