//! Position and neighbour lookup for achievements within a collection.

use std::collections::{BTreeMap, HashMap};

use crate::model::Achievement;

/// Map from achievement id to its position in one collection.
///
/// Built once per changelog run in O(n); lookups are O(1). When an id is
/// duplicated the first position wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdIndex {
    positions: HashMap<String, usize>,
}

impl IdIndex {
    pub fn build(list: &[Achievement]) -> Self {
        let mut positions = HashMap::with_capacity(list.len());
        for (index, achievement) in list.iter().enumerate() {
            if let Some(id) = achievement.id() {
                positions.entry(id.to_string()).or_insert(index);
            }
        }
        Self { positions }
    }

    pub fn get(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Ordered copy of the positions, for stable serialization.
    pub fn into_map(self) -> BTreeMap<String, usize> {
        self.positions.into_iter().collect()
    }
}

/// Names of the records immediately before and after a position.
///
/// `below` is the previous entry (the one ranked just above in the list,
/// i.e. with the lower rank number) and `above` the next one. The naming
/// follows the changelog wording: a record is placed *below* its
/// predecessor and *above* its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Context<'a> {
    pub below: Option<&'a str>,
    pub above: Option<&'a str>,
}

impl Context<'_> {
    pub fn is_empty(&self) -> bool {
        self.below.is_none() && self.above.is_none()
    }
}

/// Neighbours of `index` in `all`. Out-of-range indexes have no neighbours.
pub fn context_at(all: &[Achievement], index: usize) -> Context<'_> {
    if index >= all.len() {
        return Context::default();
    }
    Context {
        below: index
            .checked_sub(1)
            .and_then(|i| all.get(i))
            .map(|a| a.name.as_str()),
        above: all.get(index + 1).map(|a| a.name.as_str()),
    }
}

/// Find the position of `achievement` in `all`: id index first, then a
/// linear scan by id, otherwise not found.
pub fn resolve_index(
    achievement: &Achievement,
    all: &[Achievement],
    index: Option<&IdIndex>,
) -> Option<usize> {
    let id = achievement.id()?;
    if let Some(found) = index.and_then(|idx| idx.get(id)) {
        return Some(found);
    }
    all.iter().position(|a| a.id() == Some(id))
}

/// A collection paired with its id index.
#[derive(Debug, Clone)]
pub struct ContextResolver<'a> {
    list: &'a [Achievement],
    index: IdIndex,
}

impl<'a> ContextResolver<'a> {
    pub fn new(list: &'a [Achievement]) -> Self {
        Self {
            list,
            index: IdIndex::build(list),
        }
    }

    pub fn list(&self) -> &'a [Achievement] {
        self.list
    }

    pub fn id_index(&self) -> &IdIndex {
        &self.index
    }

    pub fn index_of(&self, achievement: &Achievement) -> Option<usize> {
        resolve_index(achievement, self.list, Some(&self.index))
    }

    pub fn context_at(&self, index: usize) -> Context<'a> {
        context_at(self.list, index)
    }

    /// Neighbours of `achievement`, empty when it cannot be located
    pub fn context_of(&self, achievement: &Achievement) -> Context<'a> {
        self.index_of(achievement)
            .map(|i| self.context_at(i))
            .unwrap_or_default()
    }
}
