//! Turn structure.
//!
//! A turn walks the twelve phases below in a fixed order. Five of them
//! have no player-facing decisions and advance as soon as their entry
//! action has run; the rest grant priority.

use serde::{Deserialize, Serialize};

/// A phase (or step) of the turn, in turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Untap,
    Upkeep,
    Draw,
    Main1,
    CombatBegin,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    CombatEnd,
    Main2,
    End,
    Cleanup,
}

impl Phase {
    /// Every phase in turn order.
    pub const ALL: [Phase; 12] = [
        Phase::Untap,
        Phase::Upkeep,
        Phase::Draw,
        Phase::Main1,
        Phase::CombatBegin,
        Phase::DeclareAttackers,
        Phase::DeclareBlockers,
        Phase::CombatDamage,
        Phase::CombatEnd,
        Phase::Main2,
        Phase::End,
        Phase::Cleanup,
    ];

    /// The following phase, or `None` after cleanup (the turn ends).
    #[must_use]
    pub fn next(self) -> Option<Phase> {
        let index = Self::ALL.iter().position(|&p| p == self)?;
        Self::ALL.get(index + 1).copied()
    }

    /// Phases that run their entry action and advance without granting
    /// priority.
    #[must_use]
    pub const fn is_automatic(self) -> bool {
        matches!(
            self,
            Phase::Untap | Phase::Draw | Phase::CombatDamage | Phase::CombatEnd | Phase::Cleanup
        )
    }

    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Phase::Main1 | Phase::Main2)
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Untap => "untap",
            Phase::Upkeep => "upkeep",
            Phase::Draw => "draw",
            Phase::Main1 => "main1",
            Phase::CombatBegin => "combat_begin",
            Phase::DeclareAttackers => "declare_attackers",
            Phase::DeclareBlockers => "declare_blockers",
            Phase::CombatDamage => "combat_damage",
            Phase::CombatEnd => "combat_end",
            Phase::Main2 => "main2",
            Phase::End => "end",
            Phase::Cleanup => "cleanup",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        let mut phase = Phase::Untap;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            seen.push(next);
            phase = next;
        }
        assert_eq!(seen, Phase::ALL.to_vec());
        assert_eq!(Phase::Cleanup.next(), None);
    }

    #[test]
    fn test_automatic_phases() {
        let automatic: Vec<_> = Phase::ALL.iter().filter(|p| p.is_automatic()).collect();
        assert_eq!(
            automatic,
            vec![
                &Phase::Untap,
                &Phase::Draw,
                &Phase::CombatDamage,
                &Phase::CombatEnd,
                &Phase::Cleanup
            ]
        );
    }

    #[test]
    fn test_main_phases() {
        assert!(Phase::Main1.is_main());
        assert!(Phase::Main2.is_main());
        assert!(!Phase::CombatBegin.is_main());
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::DeclareBlockers.to_string(), "declare_blockers");
    }
}
