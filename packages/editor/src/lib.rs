//! Cursor-position queries over class strings.
//!
//! Both entry points reuse the parser with `break_at` set to the cursor
//! offset, so text after the cursor costs nothing, then walk the partial
//! tree down to the node under the cursor:
//!
//! - [`suggest`] returns completion context: the node being typed, the
//!   variants already applied on the way there, and whether the cursor is
//!   inside a comment.
//! - [`hover`] returns tooltip context: the node plus its fully resolved
//!   variant chain and importance.

pub mod hover;
pub mod locate;
pub mod suggest;

#[cfg(test)]
mod tests;

pub use hover::{hover, hover_in, CssPart, Hover};
pub use locate::{locate, Location, Target};
pub use suggest::{suggest, suggest_in, Suggestion};
