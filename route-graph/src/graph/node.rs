use std::{borrow::Borrow, cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// A node in a graph. It is identified by an unique unsigned integer.
///
/// Within a [`RouteGraph`](super::RouteGraph) node ids follow the lexicographic order of the city labels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Node(usize);

impl Node {
    pub fn new(id: usize) -> Self {
        Node(id)
    }

    pub fn id(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Node) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Node) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl From<usize> for Node {
    fn from(id: usize) -> Self {
        Node::new(id)
    }
}

/// A city, identified by its label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct City(String);

impl City {
    pub fn new(label: impl Into<String>) -> Self {
        City(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for City {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for City {
    fn from(label: &str) -> Self {
        City::new(label)
    }
}

impl From<String> for City {
    fn from(label: String) -> Self {
        City(label)
    }
}
