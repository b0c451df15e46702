//! Opponent personalities: six behavioural traits seeded from an archetype.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::DecisionError;

/// Half-width of the uniform offset applied to each archetype trait.
pub const TRAIT_JITTER: f64 = 0.05;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    TightPassive,
    TightAggressive,
    LooseAggressive,
    LoosePassive,
    Maniac,
    Rock,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::TightPassive,
        Archetype::TightAggressive,
        Archetype::LooseAggressive,
        Archetype::LoosePassive,
        Archetype::Maniac,
        Archetype::Rock,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Archetype {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::TightPassive => "Tight Passive",
            Archetype::TightAggressive => "Tight Aggressive",
            Archetype::LooseAggressive => "Loose Aggressive",
            Archetype::LoosePassive => "Loose Passive",
            Archetype::Maniac => "Maniac",
            Archetype::Rock => "Rock",
        }
    }

    /// Trait values before jitter: aggression, tightness, bluff frequency,
    /// adaptability, patience, risk tolerance.
    fn base(self) -> [f64; 6] {
        match self {
            Archetype::TightPassive => [0.2, 0.8, 0.05, 0.3, 0.9, 0.2],
            Archetype::TightAggressive => [0.7, 0.7, 0.15, 0.6, 0.8, 0.4],
            Archetype::LooseAggressive => [0.8, 0.3, 0.25, 0.7, 0.3, 0.8],
            Archetype::LoosePassive => [0.3, 0.3, 0.1, 0.4, 0.4, 0.6],
            Archetype::Maniac => [0.9, 0.1, 0.3, 0.5, 0.1, 0.9],
            Archetype::Rock => [0.4, 0.9, 0.02, 0.2, 0.95, 0.1],
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = DecisionError;

    /// Accepts display names and kebab/snake case (`"Rock"`, `"tight-aggressive"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Archetype::ALL
            .into_iter()
            .find(|a| a.name().replace(' ', "").to_ascii_lowercase() == key)
            .ok_or_else(|| DecisionError::UnknownArchetype(s.to_string()))
    }
}

/// What a personality offset is being computed for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Intent {
    /// Short-stack shove
    Push,
    /// Calling a shove or a bet
    Call,
    /// Deep-stack play in general
    General,
}

/// Trait values in `[0, 1]`, fixed for the whole game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIPersonality {
    pub archetype: Archetype,
    pub aggression: f64,
    pub tightness: f64,
    pub bluff_frequency: f64,
    pub adaptability: f64,
    pub patience: f64,
    pub risk_tolerance: f64,
}

impl AIPersonality {
    /// Exact archetype values, without jitter.
    pub fn base(archetype: Archetype) -> Self {
        let [aggression, tightness, bluff_frequency, adaptability, patience, risk_tolerance] =
            archetype.base();
        Self {
            archetype,
            aggression,
            tightness,
            bluff_frequency,
            adaptability,
            patience,
            risk_tolerance,
        }
    }

    /// Archetype values with each trait moved by up to [`TRAIT_JITTER`].
    pub fn from_archetype<R: Rng + ?Sized>(archetype: Archetype, rng: &mut R) -> Self {
        let mut p = Self::base(archetype);
        for t in [
            &mut p.aggression,
            &mut p.tightness,
            &mut p.bluff_frequency,
            &mut p.adaptability,
            &mut p.patience,
            &mut p.risk_tolerance,
        ] {
            *t = jitter(*t, rng);
        }
        p
    }

    /// Signed score offset the traits contribute for `intent`.
    ///
    /// Each trait moves the score by at most 0.2 either way: aggression only
    /// for pushes, patience only when the hand is weak (`raw_strength < 0.4`),
    /// tightness always against playing the hand.
    pub fn adjustment(&self, raw_strength: f64, intent: Intent) -> f64 {
        let mut adj = -(self.tightness - 0.5) * 0.3;
        match intent {
            Intent::Push => {
                adj += (self.aggression - 0.5) * 0.4;
                adj += (self.risk_tolerance - 0.5) * 0.3;
            }
            Intent::Call => adj += (self.risk_tolerance - 0.5) * 0.3,
            Intent::General => {}
        }
        if raw_strength < 0.4 {
            adj -= (self.patience - 0.5) * 0.4;
        }
        adj
    }
}

fn jitter<R: Rng + ?Sized>(value: f64, rng: &mut R) -> f64 {
    (value + rng.random_range(-TRAIT_JITTER..=TRAIT_JITTER)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn jitter_stays_close_to_archetype() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for archetype in Archetype::ALL {
            let base = AIPersonality::base(archetype);
            for _ in 0..50 {
                let p = AIPersonality::from_archetype(archetype, &mut rng);
                for (a, b) in [
                    (p.aggression, base.aggression),
                    (p.tightness, base.tightness),
                    (p.bluff_frequency, base.bluff_frequency),
                    (p.adaptability, base.adaptability),
                    (p.patience, base.patience),
                    (p.risk_tolerance, base.risk_tolerance),
                ] {
                    assert!((0.0..=1.0).contains(&a));
                    assert!((a - b).abs() <= TRAIT_JITTER + 1e-9);
                }
            }
        }
    }

    #[test]
    fn archetype_names_parse() {
        assert_eq!("Rock".parse::<Archetype>().unwrap(), Archetype::Rock);
        assert_eq!(
            "tight-aggressive".parse::<Archetype>().unwrap(),
            Archetype::TightAggressive
        );
        assert_eq!(
            "loose_passive".parse::<Archetype>().unwrap(),
            Archetype::LoosePassive
        );
        assert!("shark".parse::<Archetype>().is_err());
    }

    #[test]
    fn maniac_pushes_looser_than_rock() {
        let maniac = AIPersonality::base(Archetype::Maniac);
        let rock = AIPersonality::base(Archetype::Rock);
        assert!(maniac.adjustment(0.3, Intent::Push) > 0.0);
        assert!(rock.adjustment(0.3, Intent::Push) < 0.0);
        assert!(maniac.adjustment(0.3, Intent::Push) > rock.adjustment(0.3, Intent::Push));
    }
}
