//! Fog-of-war intensity around the player.
//! Per-cell ray checks against walls, with a linear falloff to the vision edge.

use super::*;

const EDGE_ALPHA_DROP: f32 = 0.8;
const HIDING_DIM: f32 = 0.5;

/// Pure function of its inputs. Cells past `vision_radius` (Euclidean) or
/// behind a wall are dark; walls on the ray's end are lit. While hiding only
/// the player's immediate ring keeps full intensity.
pub fn compute_visibility(
    maze: &Maze,
    player_pos: Pos,
    vision_radius: u32,
    is_hiding: bool,
) -> VisibilityMap {
    let mut map = VisibilityMap::dark(maze.width, maze.height);
    if !maze.in_bounds(player_pos) || vision_radius == 0 {
        return map;
    }
    let radius = vision_radius as f32;
    let reach = vision_radius as i32;

    let min_y = (player_pos.y - reach).max(0);
    let max_y = (player_pos.y + reach).min(maze.height as i32 - 1);
    let min_x = (player_pos.x - reach).max(0);
    let max_x = (player_pos.x + reach).min(maze.width as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let pos = Pos { y, x };
            let alpha = if pos == player_pos {
                1.0
            } else {
                let dist = euclidean(player_pos, pos);
                if dist > radius || !has_line_of_sight(maze, player_pos, pos) {
                    continue;
                }
                let falloff = 1.0 - EDGE_ALPHA_DROP * dist / radius;
                if is_hiding && chebyshev(player_pos, pos) > 1 {
                    falloff * HIDING_DIM
                } else {
                    falloff
                }
            };
            map.alpha[(y as usize) * maze.width + (x as usize)] = alpha.clamp(0.0, 1.0);
        }
    }
    map
}

/// ASCII dump of lit cells for test failure messages.
#[cfg(test)]
pub(super) fn draw_visibility_diag(maze: &Maze, visibility: &VisibilityMap, player: Pos) -> String {
    let mut out = String::new();
    for (y, row) in maze.to_rows().iter().enumerate() {
        for (x, glyph) in row.chars().enumerate() {
            let pos = Pos { y: y as i32, x: x as i32 };
            let shown = if pos == player {
                '@'
            } else if visibility.is_visible(pos) {
                glyph
            } else {
                ' '
            };
            out.push(shown);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn visibility_is_idempotent() {
        let (maze, origin) = open_room_fixture();
        let first = compute_visibility(&maze, origin, 4, false);
        let second = compute_visibility(&maze, origin, 4, false);
        assert_eq!(first, second);
    }

    #[test]
    fn player_cell_is_fully_lit_and_falloff_is_linear() {
        let (maze, origin) = open_room_fixture();
        let map = compute_visibility(&maze, origin, 4, false);
        assert_eq!(map.alpha_at(origin), 1.0);
        let two_right = Pos { y: origin.y, x: origin.x + 2 };
        assert!((map.alpha_at(two_right) - 0.6).abs() < 1e-6);
        let edge = Pos { y: origin.y, x: origin.x + 4 };
        assert!((map.alpha_at(edge) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn cells_beyond_radius_are_dark() {
        let (maze, origin) = open_room_fixture();
        let map = compute_visibility(&maze, origin, 2, false);
        // Euclidean distance sqrt(8) exceeds radius 2 even though Chebyshev is 2.
        assert!(!map.is_visible(Pos { y: origin.y + 2, x: origin.x + 2 }));
        assert!(!map.is_visible(Pos { y: origin.y, x: origin.x + 3 }));
        assert!(map.is_visible(Pos { y: origin.y + 1, x: origin.x + 1 }));
    }

    #[test]
    fn wall_is_lit_but_occludes_cells_behind_it() {
        let (maze, origin) = wall_occlusion_fixture();
        let map = compute_visibility(&maze, origin, 6, false);
        let diag = draw_visibility_diag(&maze, &map, origin);
        assert!(map.is_visible(Pos { y: origin.y, x: origin.x + 3 }), "{diag}");
        assert!(!map.is_visible(Pos { y: origin.y, x: origin.x + 4 }), "{diag}");
        assert!(!map.is_visible(Pos { y: origin.y, x: origin.x + 5 }), "{diag}");
    }

    #[test]
    fn hiding_dims_everything_past_the_adjacent_ring() {
        let (maze, origin) = open_room_fixture();
        let open = compute_visibility(&maze, origin, 4, false);
        let hidden = compute_visibility(&maze, origin, 4, true);
        let adjacent = Pos { y: origin.y + 1, x: origin.x + 1 };
        let far = Pos { y: origin.y, x: origin.x + 3 };
        assert_eq!(hidden.alpha_at(adjacent), open.alpha_at(adjacent));
        assert!((hidden.alpha_at(far) - open.alpha_at(far) * 0.5).abs() < 1e-6);
        assert_eq!(hidden.alpha_at(origin), 1.0);
    }

    #[test]
    fn alpha_stays_in_unit_range() {
        let (maze, origin) = open_room_fixture();
        for hiding in [false, true] {
            let map = compute_visibility(&maze, origin, 6, hiding);
            assert!(map.alpha.iter().all(|alpha| (0.0..=1.0).contains(alpha)));
        }
    }
}
