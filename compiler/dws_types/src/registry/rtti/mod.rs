//! RTTI identifier allocation.
//!
//! Each category (class, record, enum) has its own monotonic counter starting
//! at a configured base. An identifier, once issued for a name, is returned
//! for that name from then on.

use std::fmt;

use dws_ir::IdentMap;

use crate::{RegistryError, RttiConfig};

/// Category of an RTTI identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RttiCategory {
    Class,
    Record,
    Enum,
}

impl RttiCategory {
    const fn slot(self) -> usize {
        match self {
            RttiCategory::Class => 0,
            RttiCategory::Record => 1,
            RttiCategory::Enum => 2,
        }
    }
}

impl fmt::Display for RttiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RttiCategory::Class => "class",
            RttiCategory::Record => "record",
            RttiCategory::Enum => "enum",
        })
    }
}

#[derive(Clone, Debug)]
struct Counter {
    /// `None` once the last representable identifier was issued.
    next: Option<u32>,
    issued: IdentMap<u32>,
}

impl Counter {
    fn starting_at(base: u32) -> Self {
        Counter {
            next: Some(base),
            issued: IdentMap::new(),
        }
    }
}

/// Per-unit RTTI identifier allocator.
#[derive(Clone, Debug)]
pub struct RttiRegistry {
    counters: [Counter; 3],
}

impl RttiRegistry {
    pub fn new(config: RttiConfig) -> Self {
        RttiRegistry {
            counters: [
                Counter::starting_at(config.class_base),
                Counter::starting_at(config.record_base),
                Counter::starting_at(config.enum_base),
            ],
        }
    }

    /// Identifier of `name`, allocating the next one on first request.
    ///
    /// Fails once the category's counter has passed `u32::MAX`; identifiers
    /// are never reused.
    pub fn get_or_allocate(
        &mut self,
        category: RttiCategory,
        name: &str,
    ) -> Result<u32, RegistryError> {
        let counter = &mut self.counters[category.slot()];
        if let Some(&id) = counter.issued.get(name) {
            return Ok(id);
        }
        let Some(id) = counter.next else {
            tracing::warn!(%category, name, "rtti identifiers exhausted");
            return Err(RegistryError::RttiExhausted { category });
        };
        counter.next = id.checked_add(1);
        counter.issued.insert(name, id);
        tracing::trace!(%category, name, id, "rtti id allocated");
        Ok(id)
    }

    /// Identifier of `name` if one was issued.
    pub fn get(&self, category: RttiCategory, name: &str) -> Option<u32> {
        self.counters[category.slot()].issued.get(name).copied()
    }

    pub fn get_or_allocate_class(&mut self, name: &str) -> Result<u32, RegistryError> {
        self.get_or_allocate(RttiCategory::Class, name)
    }

    pub fn get_or_allocate_record(&mut self, name: &str) -> Result<u32, RegistryError> {
        self.get_or_allocate(RttiCategory::Record, name)
    }

    pub fn get_or_allocate_enum(&mut self, name: &str) -> Result<u32, RegistryError> {
        self.get_or_allocate(RttiCategory::Enum, name)
    }

    pub fn class_id(&self, name: &str) -> Option<u32> {
        self.get(RttiCategory::Class, name)
    }

    pub fn record_id(&self, name: &str) -> Option<u32> {
        self.get(RttiCategory::Record, name)
    }

    pub fn enum_id(&self, name: &str) -> Option<u32> {
        self.get(RttiCategory::Enum, name)
    }

    /// Name that was issued `id` in `category`.
    pub fn name_of(&self, category: RttiCategory, id: u32) -> Option<&str> {
        self.counters[category.slot()]
            .issued
            .iter()
            .find_map(|(name, &issued)| (issued == id).then_some(name))
    }
}

impl Default for RttiRegistry {
    fn default() -> Self {
        Self::new(RttiConfig::default())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
