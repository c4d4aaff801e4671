//! External adapters: input dialects, encoding detection,
//! and output dialects. Everything in this module is interface-only glue
//! around the selection core — parsing is plain line-by-line scanning.

pub mod encoding;
pub mod inform6;
pub mod output_inform;
pub mod output_zap;
pub mod txd;
pub mod zap;
