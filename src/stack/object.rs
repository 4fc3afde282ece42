//! Stack objects and the LIFO stack itself.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardId, PlayerId};

/// Unique identifier for a stack object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackObjectId(pub u32);

impl StackObjectId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StackObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StackObject({})", self.0)
    }
}

/// A spell waiting to resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackObject {
    pub id: StackObjectId,

    /// The spell card, in the stack zone while it waits.
    pub card: CardId,

    /// Who cast it (makes its choices).
    pub caster: PlayerId,

    /// Targets chosen on cast. May be empty.
    pub targets: SmallVec<[CardId; 2]>,
}

/// The shared stack (index 0 = bottom, last = top).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stack {
    objects: Vec<StackObject>,
    next_id: u32,
}

impl Stack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a spell, returning its id.
    pub fn push(&mut self, card: CardId, caster: PlayerId, targets: &[CardId]) -> StackObjectId {
        let id = StackObjectId::new(self.next_id);
        self.next_id += 1;
        self.objects.push(StackObject {
            id,
            card,
            caster,
            targets: targets.iter().copied().collect(),
        });
        id
    }

    /// Remove the most recently pushed object.
    pub fn pop(&mut self) -> Option<StackObject> {
        self.objects.pop()
    }

    #[must_use]
    pub fn top(&self) -> Option<&StackObject> {
        self.objects.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &StackObject> {
        self.objects.iter()
    }

    #[must_use]
    pub fn contains_card(&self, card: CardId) -> bool {
        self.objects.iter().any(|o| o.card == card)
    }
}
