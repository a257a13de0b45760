//! CPU ranks and the engine behind each one

use classical_engine::{GreedyEngine, MasterEngine, MinimaxEngine};
use othello_core::Engine;
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opponent strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    E,
    C,
    A,
    S,
}

impl Rank {
    /// Unlock order.
    pub const ORDER: [Rank; 4] = [Rank::E, Rank::C, Rank::A, Rank::S];

    pub fn name(self) -> &'static str {
        match self {
            Rank::E => "Novice",
            Rank::C => "Apprentice",
            Rank::A => "Expert",
            Rank::S => "Master",
        }
    }

    pub fn title(self) -> String {
        format!("Rank {self} - {}", self.name())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::E => "E",
            Rank::C => "C",
            Rank::A => "A",
            Rank::S => "S",
        }
    }

    /// The rank unlocked by beating this one, if any.
    pub fn next(self) -> Option<Rank> {
        let idx = Self::ORDER.iter().position(|&r| r == self)?;
        Self::ORDER.get(idx + 1).copied()
    }

    /// A fresh engine for this rank.
    pub fn create_engine(self) -> Box<dyn Engine> {
        match self {
            Rank::E => Box::new(RandomEngine::new()),
            Rank::C => Box::new(GreedyEngine::new()),
            Rank::A => Box::new(MinimaxEngine::new()),
            Rank::S => Box::new(MasterEngine::new()),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "e" | "novice" | "random" => Ok(Rank::E),
            "c" | "apprentice" | "greedy" => Ok(Rank::C),
            "a" | "expert" | "minimax" => Ok(Rank::A),
            "s" | "master" => Ok(Rank::S),
            _ => Err(format!("Unknown rank: {s} (expected one of E, C, A, S)")),
        }
    }
}

#[cfg(test)]
#[path = "rank_tests.rs"]
mod rank_tests;
