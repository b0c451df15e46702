//! # coach-engine: Hold'em Trainer Core
//!
//! A Texas Hold'em engine for a single table of 2 to 10 seats. Provides the
//! hand state machine, hand evaluation and the pure calculators used by the
//! coaching tools, with seedable RNG for reproducible deals.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`engine`] - Hand state machine: blinds, betting rounds, showdown
//! - [`game`] - Table configuration and the shared game state snapshot
//! - [`hand`] - Best-five-of-seven evaluation and comparison
//! - [`player`] - Player state, positions and actions
//! - [`pot`] - Pot splitting between co-winners
//! - [`rules`] - Betting validation and legal action sets
//! - [`logger`] - Action log and showdown records
//! - [`csi`] - Chip Stack Index zones and tips
//! - [`odds`] - Pot odds, outs and equity estimates
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use coach_engine::cards::parse_cards;
//! use coach_engine::hand::{evaluate_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let eval = evaluate_hand(&cards).unwrap();
//! assert_eq!(eval.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Deals
//!
//! ```rust
//! use coach_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! assert_eq!(a.deal_many(5), b.deal_many(5));
//! ```

pub mod cards;
pub mod csi;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod odds;
pub mod player;
pub mod pot;
pub mod rules;
