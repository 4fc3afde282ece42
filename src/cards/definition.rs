//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: printed
//! characteristics plus its behavior (abilities, targeting requirement,
//! resolution routine). Definitions are shared between instances through
//! an `Arc`.
//!
//! Instance-specific data (zone, counters, tapped) is stored separately
//! in `Card`.

use smallvec::SmallVec;

use super::types::{CardType, Keyword, Rarity};
use crate::core::error::EngineError;
use crate::effects::{Ability, TargetFilter};
use crate::game::Game;
use crate::mana::{Color, ManaCost, ManaError};
use crate::stack::StackObject;

/// Resolution routine for a spell leaving the stack.
///
/// Returns `Ok(false)` when the spell resolves without effect (for
/// example, its target disappeared).
pub type ResolveFn = fn(&mut Game, &StackObject) -> Result<bool, EngineError>;

/// What a spell must target when cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRequirement {
    pub filter: TargetFilter,
    pub count: usize,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use mtg_rules::cards::{CardDefinition, CardType, Keyword};
///
/// let bear = CardDefinition::printed("Grizzly Bears", "{1}{G}", "Creature — Bear")
///     .unwrap()
///     .with_stats(2, 2);
///
/// assert!(bear.has_type(CardType::Creature));
/// assert_eq!(bear.mana_cost.total_cmc(), 2);
/// assert!(!bear.has_keyword(Keyword::Flash));
/// ```
#[derive(Clone, Debug)]
pub struct CardDefinition {
    /// Display name, also the registry key.
    pub name: String,

    pub mana_cost: ManaCost,

    /// Printed type line, e.g. `Artifact Creature — Robot`.
    pub type_line: String,

    /// Types parsed from `type_line`.
    pub types: SmallVec<[CardType; 2]>,

    pub colors: SmallVec<[Color; 2]>,

    /// Base power, for creatures.
    pub power: Option<i32>,

    /// Base toughness, for creatures.
    pub toughness: Option<i32>,

    pub rarity: Rarity,

    pub rules_text: String,

    pub keywords: SmallVec<[Keyword; 2]>,

    pub abilities: Vec<Ability>,

    /// Targets chosen when the spell is cast.
    pub target: Option<TargetRequirement>,

    /// Custom resolution. Without one, permanents enter the battlefield
    /// and other spells go to the graveyard.
    pub resolve: Option<ResolveFn>,
}

impl CardDefinition {
    /// Create a definition with a free cost.
    #[must_use]
    pub fn new(name: impl Into<String>, type_line: impl Into<String>) -> Self {
        let type_line = type_line.into();
        Self {
            name: name.into(),
            mana_cost: ManaCost::free(),
            types: CardType::parse_type_line(&type_line),
            type_line,
            colors: SmallVec::new(),
            power: None,
            toughness: None,
            rarity: Rarity::Common,
            rules_text: String::new(),
            keywords: SmallVec::new(),
            abilities: Vec::new(),
            target: None,
            resolve: None,
        }
    }

    /// Create a definition from printed name, cost and type line.
    pub fn printed(
        name: impl Into<String>,
        mana_cost: &str,
        type_line: impl Into<String>,
    ) -> Result<Self, ManaError> {
        Ok(Self::new(name, type_line).with_cost(ManaCost::parse(mana_cost)?))
    }

    #[must_use]
    pub fn with_cost(mut self, cost: ManaCost) -> Self {
        self.mana_cost = cost;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: &[Color]) -> Self {
        self.colors = colors.iter().copied().collect();
        self
    }

    /// Set base power and toughness.
    #[must_use]
    pub fn with_stats(mut self, power: i32, toughness: i32) -> Self {
        self.power = Some(power);
        self.toughness = Some(toughness);
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.rules_text = text.into();
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    #[must_use]
    pub fn with_target(mut self, filter: TargetFilter, count: usize) -> Self {
        self.target = Some(TargetRequirement { filter, count });
        self
    }

    #[must_use]
    pub fn with_resolve(mut self, routine: ResolveFn) -> Self {
        self.resolve = Some(routine);
        self
    }

    #[must_use]
    pub fn has_type(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.has_type(CardType::Creature)
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        self.has_type(CardType::Land)
    }

    /// Whether this card stays on the battlefield once it resolves.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        !self.types.is_empty() && self.types.iter().all(|t| t.is_permanent())
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Castable whenever its controller has priority.
    #[must_use]
    pub fn is_instant_speed(&self) -> bool {
        self.has_type(CardType::Instant) || self.has_keyword(Keyword::Flash)
    }

    /// Color this permanent taps for.
    ///
    /// Taken from a declared `{T}: Add` ability; lands without one fall
    /// back to their basic land name.
    #[must_use]
    pub fn mana_color(&self) -> Option<Color> {
        self.abilities
            .iter()
            .find_map(|a| a.mana_color())
            .or_else(|| {
                if self.is_land() {
                    Color::from_basic_land_name(&self.name)
                } else {
                    None
                }
            })
    }
}
