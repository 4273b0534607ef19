//! # Lexis Guards
//!
//! Fast, deterministic context checks that veto a substitution before any
//! model is consulted.
//!
//! ## Guards
//!
//! - **Antonym**: the candidate means the opposite of the original
//! - **Idiom**: the original sits inside a fixed expression ("in hot water")
//! - **Proper noun**: the original is part of a name ("Hot Springs", "President Strong")
//! - **Negation**: a negator/diminisher precedes the original ("not very hot");
//!   an intensifier alone only widens the evaluated phrase ("very hot")
//!
//! Every guard looks at the **first** occurrence of the word in the sentence
//! only; scoring and replacement downstream make the same assumption.
//!
//! ## Example
//!
//! ```rust
//! use lexis_guards::Guards;
//!
//! let guards = Guards::new();
//! assert!(guards.is_antonym("cold", "hot"));
//! assert!(guards.is_idiom("I got myself in hot water.", "hot"));
//! assert!(guards.is_proper_noun("Hot Springs Hotel welcomed guests.", "hot"));
//! assert!(guards.negation("He was not very hot about it.", "hot", 4).negated);
//! ```

mod guards;
mod tables;
pub mod text;

pub use guards::{Guards, NegationVerdict};
pub use tables::{GuardTables, Idiom, BUILTIN_TABLES};
