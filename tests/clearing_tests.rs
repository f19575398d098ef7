//! Scenario tests for matching and cascade resolution on hand-built fields

use voxfall::core::{find_matches, resolve_cascades, Cube, Field};
use voxfall::types::CubeColor;

fn cube(x: i32, y: i32, z: i32, color: CubeColor) -> Cube {
    Cube { x, y, z, color }
}

fn field_of(cubes: &[Cube]) -> Field {
    let mut field = Field::new();
    for &c in cubes {
        field.push(c);
    }
    field
}

#[test]
fn test_l_shaped_component_clears_whole() {
    let mut field = field_of(&[
        cube(2, 0, 2, CubeColor::Red),
        cube(3, 0, 2, CubeColor::Red),
        cube(3, 1, 2, CubeColor::Red),
        cube(3, 1, 3, CubeColor::Red),
    ]);
    let outcome = resolve_cascades(&mut field);
    assert_eq!(outcome.cubes_removed, 4);
    assert!(field.is_empty());
}

#[test]
fn test_depth_line_clears_like_width_line() {
    let mut field = field_of(&[
        cube(5, 0, 3, CubeColor::Cyan),
        cube(5, 0, 4, CubeColor::Cyan),
        cube(5, 0, 5, CubeColor::Cyan),
    ]);
    let outcome = resolve_cascades(&mut field);
    assert_eq!(outcome.cubes_removed, 3);
    assert!(field.is_empty());
}

#[test]
fn test_vertical_stack_of_three_clears() {
    let mut field = field_of(&[
        cube(7, 0, 7, CubeColor::Yellow),
        cube(7, 1, 7, CubeColor::Yellow),
        cube(7, 2, 7, CubeColor::Yellow),
    ]);
    let outcome = resolve_cascades(&mut field);
    assert_eq!(outcome.cubes_removed, 3);
    assert!(field.is_empty());
}

#[test]
fn test_mixed_colors_leave_field_untouched() {
    let field = field_of(&[
        cube(0, 0, 0, CubeColor::Red),
        cube(1, 0, 0, CubeColor::Green),
        cube(2, 0, 0, CubeColor::Blue),
        cube(0, 1, 0, CubeColor::Yellow),
    ]);
    assert!(find_matches(field.cubes()).is_empty());
}

#[test]
fn test_survivors_fall_only_within_their_column() {
    // Red line on the floor, blue survivors in two of its columns at
    // different heights, one bystander column.
    let mut field = field_of(&[
        cube(2, 0, 5, CubeColor::Red),
        cube(3, 0, 5, CubeColor::Red),
        cube(4, 0, 5, CubeColor::Red),
        cube(2, 1, 5, CubeColor::Blue),
        cube(4, 3, 5, CubeColor::Magenta),
        cube(8, 2, 5, CubeColor::Green),
    ]);
    resolve_cascades(&mut field);

    assert!(field.cube_at(2, 0, 5).is_some());
    assert!(field.cube_at(4, 2, 5).is_some());
    assert!(field.cube_at(8, 2, 5).is_some(), "bystander must not move");
    assert_eq!(field.len(), 3);
}

#[test]
fn test_three_pass_chain() {
    // Pass 1 removes the reds; greens drop and match in pass 2; their
    // removal drops the blues into a pass-3 match.
    let mut field = field_of(&[
        cube(2, 0, 2, CubeColor::Red),
        cube(3, 0, 2, CubeColor::Red),
        cube(4, 0, 2, CubeColor::Red),
        cube(2, 1, 2, CubeColor::Green),
        cube(3, 1, 2, CubeColor::Green),
        cube(3, 0, 3, CubeColor::Green),
        cube(2, 2, 2, CubeColor::Blue),
        cube(3, 2, 2, CubeColor::Blue),
        cube(4, 1, 2, CubeColor::Blue),
    ]);
    let outcome = resolve_cascades(&mut field);

    assert_eq!(outcome.passes, 3);
    assert_eq!(outcome.cubes_removed, 9);
    assert!(field.is_empty());
}
