//! Effect definitions.
//!
//! An `Effect` pairs the rules text it implements with an `EffectAction`,
//! a data-driven description of what happens. The handful of routines
//! that are unique to one card use `EffectAction::Custom`.

use crate::cards::CounterKind;
use crate::core::error::EngineError;
use crate::core::{CardId, PlayerId};
use crate::game::Game;
use crate::mana::Color;
use crate::triggers::GameEvent;

/// Routine for effects no built-in action covers.
pub type EffectFn = fn(&mut Game, &EffectContext) -> Result<(), EngineError>;

/// What an effect does when executed.
#[derive(Clone, Copy, Debug)]
pub enum EffectAction {
    /// Add one mana of a color to the controller's pool.
    AddMana(Color),

    /// Put counters on the source.
    AddCounters { kind: CounterKind, amount: u32 },

    /// The controller draws cards.
    DrawCards(u32),

    /// Move every counter on the source onto another creature the
    /// controller chooses among the creatures they control.
    MoveCountersToCreatureYouControl,

    /// Card-specific routine.
    Custom(EffectFn),
}

/// A described, executable unit of behavior.
#[derive(Clone, Debug)]
pub struct Effect {
    /// Human-readable rules text.
    pub description: String,
    pub action: EffectAction,
}

impl Effect {
    #[must_use]
    pub fn new(description: impl Into<String>, action: EffectAction) -> Self {
        Self {
            description: description.into(),
            action,
        }
    }

    /// `{T}: Add {C}.` style mana effect.
    #[must_use]
    pub fn add_mana(color: Color) -> Self {
        Self::new(format!("add {{{}}}", color.symbol()), EffectAction::AddMana(color))
    }

    #[must_use]
    pub fn add_counters(kind: CounterKind, amount: u32) -> Self {
        Self::new(
            format!("put {} {} counter(s) on this", amount, kind),
            EffectAction::AddCounters { kind, amount },
        )
    }

    #[must_use]
    pub fn draw_cards(count: u32) -> Self {
        let description = if count == 1 {
            "draw a card".to_string()
        } else {
            format!("draw {} cards", count)
        };
        Self::new(description, EffectAction::DrawCards(count))
    }

    #[must_use]
    pub fn custom(description: impl Into<String>, routine: EffectFn) -> Self {
        Self::new(description, EffectAction::Custom(routine))
    }

    /// Color produced, when this is a mana effect.
    #[must_use]
    pub fn produced_color(&self) -> Option<Color> {
        match self.action {
            EffectAction::AddMana(color) => Some(color),
            _ => None,
        }
    }
}

/// Who and what an effect is executing for.
#[derive(Clone, Debug)]
pub struct EffectContext {
    /// The card the effect belongs to.
    pub source: CardId,
    /// Player making the effect's choices.
    pub controller: PlayerId,
    /// The event that triggered it, for triggered abilities.
    pub event: Option<GameEvent>,
}

impl EffectContext {
    #[must_use]
    pub fn new(source: CardId, controller: PlayerId) -> Self {
        Self {
            source,
            controller,
            event: None,
        }
    }

    #[must_use]
    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.event = Some(event);
        self
    }
}
