//! Near-optimal Z-machine string abbreviation selection.
//!
//! Computes the set of abbreviation strings a Z-machine
//! compiler (ZIL/ZAPF or Inform6) should emit to minimize compiled game
//! size, given a corpus of in-game text. See `DESIGN.md` for how each
//! module is grounded.

pub mod adapters;
pub mod alphabet;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod custom_alphabet;
pub mod driver;
pub mod pattern;
pub mod refine;
pub mod rescore;
pub mod select;
pub mod suffix_array;
pub mod zversion;
