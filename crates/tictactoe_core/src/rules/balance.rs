//! Marker balance: X and O counts never differ by more than one.

use tracing::{instrument, warn};

use crate::types::{Marker, Snapshot};

/// Checks that the two marker counts differ by at most one.
///
/// Turn alternation keeps this true; the board itself does not enforce it.
#[instrument(skip(board))]
pub fn is_balanced(board: &Snapshot) -> bool {
    let count = |wanted: Marker| board.iter().filter(|c| c.marker() == Some(wanted)).count();
    let (x_count, o_count) = (count(Marker::X), count(Marker::O));

    let valid = x_count.abs_diff(o_count) <= 1;
    if !valid {
        warn!(x_count, o_count, "Marker balance violated");
    }
    valid
}
