//! Abilities: triggered, activated and static.

use super::effect::Effect;
use crate::mana::{Color, ManaCost};
use crate::triggers::TriggerCondition;

/// Cost paid to activate an ability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivationCost {
    /// `{T}`: the source must be untapped and becomes tapped.
    pub tap: bool,
    /// Mana paid from the pool and untapped lands.
    pub mana: ManaCost,
    /// The source is sacrificed.
    pub sacrifice: bool,
}

impl ActivationCost {
    /// `{T}`.
    #[must_use]
    pub fn tap() -> Self {
        Self {
            tap: true,
            ..Self::default()
        }
    }

    /// A mana-only cost.
    #[must_use]
    pub fn mana(cost: ManaCost) -> Self {
        Self {
            mana: cost,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sacrifice(mut self) -> Self {
        self.sacrifice = true;
        self
    }
}

impl std::fmt::Display for ActivationCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if !self.mana.is_free() {
            parts.push(self.mana.to_string());
        }
        if self.tap {
            parts.push("{T}".to_string());
        }
        if self.sacrifice {
            parts.push("Sacrifice this".to_string());
        }
        if parts.is_empty() {
            parts.push("{0}".to_string());
        }
        f.write_str(&parts.join(", "))
    }
}

#[derive(Clone, Debug)]
pub enum AbilityKind {
    /// Fires when a matching event happens.
    Triggered(TriggerCondition),
    /// Used by a player paying its cost.
    Activated(ActivationCost),
    /// Always on. Carried for display; the engine has no layer system.
    Static,
}

/// One ability on a card definition.
#[derive(Clone, Debug)]
pub struct Ability {
    pub kind: AbilityKind,
    pub effect: Effect,
}

impl Ability {
    #[must_use]
    pub fn triggered(condition: TriggerCondition, effect: Effect) -> Self {
        Self {
            kind: AbilityKind::Triggered(condition),
            effect,
        }
    }

    #[must_use]
    pub fn activated(cost: ActivationCost, effect: Effect) -> Self {
        Self {
            kind: AbilityKind::Activated(cost),
            effect,
        }
    }

    #[must_use]
    pub fn static_ability(effect: Effect) -> Self {
        Self {
            kind: AbilityKind::Static,
            effect,
        }
    }

    /// `{T}: Add {color}.`
    #[must_use]
    pub fn mana(color: Color) -> Self {
        Self::activated(ActivationCost::tap(), Effect::add_mana(color))
    }

    #[must_use]
    pub fn activation_cost(&self) -> Option<&ActivationCost> {
        match &self.kind {
            AbilityKind::Activated(cost) => Some(cost),
            _ => None,
        }
    }

    #[must_use]
    pub fn trigger_condition(&self) -> Option<&TriggerCondition> {
        match &self.kind {
            AbilityKind::Triggered(condition) => Some(condition),
            _ => None,
        }
    }

    /// Color produced by a tap-for-mana ability.
    #[must_use]
    pub fn mana_color(&self) -> Option<Color> {
        let cost = self.activation_cost()?;
        if cost.tap && cost.mana.is_free() && !cost.sacrifice {
            self.effect.produced_color()
        } else {
            None
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            AbilityKind::Triggered(condition) => {
                write!(f, "{}, {}", condition, self.effect.description)
            }
            AbilityKind::Activated(cost) => write!(f, "{}: {}", cost, self.effect.description),
            AbilityKind::Static => f.write_str(&self.effect.description),
        }
    }
}
