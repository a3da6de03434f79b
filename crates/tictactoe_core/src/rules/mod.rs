//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Rules are separated from board
//! storage so they can be called standalone and tested in isolation.

pub mod balance;
pub mod draw;
pub mod win;

pub use balance::is_balanced;
pub use draw::is_full;
pub use win::{LINES, check_winner, evaluate};
