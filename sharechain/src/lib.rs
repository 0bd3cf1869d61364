//! Implementation of the share chain state machine.

#[macro_use]
extern crate mmr;

mod errors;
mod share;
mod state;
mod tips;


pub use self::errors::*;
pub use self::share::*;
pub use self::state::*;
pub use self::tips::*;
