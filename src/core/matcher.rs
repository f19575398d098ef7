//! Match engine - connected-component search over settled cubes
//!
//! Two cubes are adjacent when they share a color and differ by exactly one
//! lattice unit along exactly one axis (strict 6-neighborhood). Components
//! of `MIN_MATCH_SIZE` or more are returned whole; smaller ones stay put.
//!
//! The traversal is an explicit-stack DFS over arena indices with a
//! `Vec<bool>` visited marker. Component membership is independent of
//! traversal order; only the ordering of indices in the output may vary.

use std::collections::HashMap;

use crate::core::field::Cube;
use crate::types::MIN_MATCH_SIZE;

const NEIGHBOR_STEPS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Find all cubes belonging to same-color components of size >= 3.
///
/// Returns arena indices into `cubes`, each at most once.
pub fn find_matches(cubes: &[Cube]) -> Vec<usize> {
    let mut by_cell: HashMap<(i32, i32, i32), usize> = HashMap::with_capacity(cubes.len());
    for (i, cube) in cubes.iter().enumerate() {
        by_cell.insert((cube.x, cube.y, cube.z), i);
    }

    let mut visited = vec![false; cubes.len()];
    let mut matches = Vec::new();
    let mut stack = Vec::new();
    let mut group = Vec::new();

    for start in 0..cubes.len() {
        if visited[start] {
            continue;
        }

        group.clear();
        visited[start] = true;
        stack.push(start);

        while let Some(i) = stack.pop() {
            group.push(i);
            let cube = &cubes[i];
            for &(dx, dy, dz) in &NEIGHBOR_STEPS {
                let key = (cube.x + dx, cube.y + dy, cube.z + dz);
                if let Some(&j) = by_cell.get(&key) {
                    if !visited[j] && cubes[j].color == cube.color {
                        visited[j] = true;
                        stack.push(j);
                    }
                }
            }
        }

        if group.len() >= MIN_MATCH_SIZE {
            matches.extend_from_slice(&group);
        }
    }

    matches
}
