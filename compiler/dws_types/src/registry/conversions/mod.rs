//! Conversion registry: implicit and explicit conversion edges.
//!
//! The two kinds live in separate stores, so the same `(from, to)` pair may be
//! declared once implicitly and once explicitly. Implicit edges also form a
//! graph searched breadth-first for chained conversions.

use std::collections::VecDeque;

use dws_ir::{IdentKey, IdentSet};
use rustc_hash::FxHashMap;

use crate::RegistryError;

/// A registered conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionEntry {
    pub from: String,
    pub to: String,
    /// Routine performing the conversion.
    pub binding: String,
    pub implicit: bool,
}

impl ConversionEntry {
    pub fn implicit(from: &str, to: &str, binding: &str) -> Self {
        ConversionEntry {
            from: from.to_owned(),
            to: to.to_owned(),
            binding: binding.to_owned(),
            implicit: true,
        }
    }

    pub fn explicit(from: &str, to: &str, binding: &str) -> Self {
        ConversionEntry {
            implicit: false,
            ..Self::implicit(from, to, binding)
        }
    }
}

type ConversionKey = (IdentKey, IdentKey);

fn key(from: &str, to: &str) -> ConversionKey {
    (IdentKey::new(from), IdentKey::new(to))
}

/// Registry of type conversions.
#[derive(Clone, Debug, Default)]
pub struct ConversionRegistry {
    implicit: FxHashMap<ConversionKey, ConversionEntry>,
    explicit: FxHashMap<ConversionKey, ConversionEntry>,
    /// Source type -> keys of implicit edges leaving it, in registration order.
    outgoing: FxHashMap<IdentKey, Vec<ConversionKey>>,
}

impl ConversionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion; rejects a repeated `(from, to)` pair of the same kind.
    pub fn register(&mut self, entry: ConversionEntry) -> Result<(), RegistryError> {
        let k = key(&entry.from, &entry.to);
        let store = if entry.implicit {
            &mut self.implicit
        } else {
            &mut self.explicit
        };
        if store.contains_key(&k) {
            return Err(RegistryError::DuplicateConversion {
                from: entry.from,
                to: entry.to,
                implicit: entry.implicit,
            });
        }

        tracing::debug!(
            from = %entry.from,
            to = %entry.to,
            implicit = entry.implicit,
            "conversion registered"
        );
        if entry.implicit {
            self.outgoing.entry(k.0.clone()).or_default().push(k.clone());
        }
        store.insert(k, entry);
        Ok(())
    }

    /// Direct implicit conversion from `from` to `to`.
    pub fn find_implicit(&self, from: &str, to: &str) -> Option<&ConversionEntry> {
        self.implicit.get(&key(from, to))
    }

    /// Direct explicit conversion from `from` to `to`.
    pub fn find_explicit(&self, from: &str, to: &str) -> Option<&ConversionEntry> {
        self.explicit.get(&key(from, to))
    }

    /// Shortest chain of implicit conversions from `from` to `to`.
    ///
    /// The result lists every type on the path, both ends included. Paths
    /// longer than `max_depth` conversions are not explored. A direct edge is
    /// returned without searching.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn find_conversion_path(&self, from: &str, to: &str, max_depth: usize) -> Option<Vec<String>> {
        if max_depth == 0 {
            return None;
        }
        if let Some(direct) = self.find_implicit(from, to) {
            return Some(vec![from.to_owned(), direct.to.clone()]);
        }

        let target = IdentKey::new(to);
        let mut visited = IdentSet::new();
        visited.insert(from);
        let mut queue = VecDeque::from([(IdentKey::new(from), vec![from.to_owned()])]);

        while let Some((current, path)) = queue.pop_front() {
            if path.len() > max_depth {
                continue;
            }
            let Some(edges) = self.outgoing.get(&current) else {
                continue;
            };
            for edge in edges {
                let Some(entry) = self.implicit.get(edge) else {
                    continue;
                };
                let next = &edge.1;
                if *next == target {
                    let mut found = path;
                    found.push(entry.to.clone());
                    tracing::trace!(hops = found.len() - 1, "conversion path found");
                    return Some(found);
                }
                if visited.insert(next.as_str()) {
                    let mut extended = path.clone();
                    extended.push(entry.to.clone());
                    queue.push_back((next.clone(), extended));
                }
            }
        }
        None
    }

    /// Number of registered conversions of both kinds.
    pub fn len(&self) -> usize {
        self.implicit.len() + self.explicit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implicit.is_empty() && self.explicit.is_empty()
    }

    pub fn clear(&mut self) {
        self.implicit.clear();
        self.explicit.clear();
        self.outgoing.clear();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
