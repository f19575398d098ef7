//! Cascade resolver - removal, column-local gravity re-settle, and chaining
//!
//! Resolution is a synchronous loop: remove the matched cubes, drop every
//! survivor by the number of removed cubes beneath it in its (x, z) column,
//! then re-run the match engine until a pass finds nothing. The reference's
//! inter-pass delay is cosmetic pacing and lives in the frontend, not here.
//!
//! Termination: each pass removes at least `MIN_MATCH_SIZE` cubes from a
//! finite field.

use crate::core::field::Field;
use crate::core::matcher::find_matches;

/// Summary of one full cascade resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    /// Total cubes removed across all passes.
    pub cubes_removed: u32,
    /// Number of remove+settle passes that found a match.
    pub passes: u32,
}

/// Remove one batch of matched cubes and re-settle the survivors.
///
/// `removal` holds arena indices into the field. The gravity shift is
/// computed in one pass from the original removal set: a survivor drops by
/// the count of removed cubes sharing its column with strictly smaller y.
fn remove_and_settle(field: &mut Field, removal: &[usize]) {
    let cubes = field.cubes_mut();

    let mut doomed = vec![false; cubes.len()];
    for &i in removal {
        doomed[i] = true;
    }
    let removed: Vec<_> = removal.iter().map(|&i| cubes[i]).collect();

    let mut keep = doomed.iter().map(|d| !d);
    cubes.retain(|_| keep.next().unwrap_or(true));

    for cube in cubes.iter_mut() {
        let below = removed
            .iter()
            .filter(|r| r.x == cube.x && r.z == cube.z && r.y < cube.y)
            .count();
        cube.y -= below as i32;
    }
}

/// Resolve all cascades triggered by a landing: match, remove, re-settle,
/// repeat until the field is stable.
pub fn resolve_cascades(field: &mut Field) -> CascadeOutcome {
    let mut outcome = CascadeOutcome::default();

    loop {
        let removal = find_matches(field.cubes());
        if removal.is_empty() {
            return outcome;
        }
        outcome.cubes_removed += removal.len() as u32;
        outcome.passes += 1;
        remove_and_settle(field, &removal);
    }
}
