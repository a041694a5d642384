//! Gravity integration and axis-separated tile collision
//!
//! Bodies resolve X first (against the current vertical position) and then
//! Y. Columns are scanned in ascending order and the first solid tile wins,
//! which keeps the physics reproducible.

use super::grid::TileGrid;
use super::state::Body;
use crate::tuning::Tuning;
use crate::world_to_cell;

/// Keeps an edge sitting exactly on a tile boundary out of the next cell
const EDGE_SKIN: f32 = 0.01;

/// What a body does when it runs into a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallResponse {
    /// Stop dead (player)
    Stop,
    /// Reverse horizontal direction (mushrooms)
    Bounce,
}

/// Result of vertical resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    /// No tile touched; moved by the full displacement
    Airborne,
    /// Feet snapped onto the top of a solid tile
    Landed { row: i32, col: i32 },
    /// Head bumped the bottom of a solid tile
    HeadBump { row: i32, col: i32 },
}

/// Grid rows covered by a vertical extent
fn rows_spanned(body: &Body, tile: f32) -> std::ops::RangeInclusive<i32> {
    world_to_cell(body.pos.y, tile)..=world_to_cell(body.bottom() - EDGE_SKIN, tile)
}

/// Grid columns covered by a horizontal extent
fn cols_spanned(body: &Body, tile: f32) -> std::ops::RangeInclusive<i32> {
    world_to_cell(body.pos.x, tile)..=world_to_cell(body.pos.x + body.size.x - EDGE_SKIN, tile)
}

/// Move horizontally by the body's velocity, stopping at solid columns.
///
/// Returns true if a wall was hit.
pub fn resolve_horizontal(
    body: &mut Body,
    grid: &TileGrid,
    tile: f32,
    response: WallResponse,
) -> bool {
    let vx = body.vel.x;
    if vx == 0.0 {
        return false;
    }

    // Leading edge column and the x that puts the body flush against it
    let (col, flush_x) = if vx > 0.0 {
        let col = world_to_cell(body.pos.x + body.size.x + vx - EDGE_SKIN, tile);
        (col, col as f32 * tile - body.size.x)
    } else {
        let col = world_to_cell(body.pos.x + vx, tile);
        (col, (col + 1) as f32 * tile)
    };

    if rows_spanned(body, tile).any(|row| grid.solid_at(row, col)) {
        body.pos.x = flush_x;
        body.vel.x = match response {
            WallResponse::Stop => 0.0,
            WallResponse::Bounce => -vx,
        };
        true
    } else {
        body.pos.x += vx;
        false
    }
}

/// Apply gravity, then move vertically with landing and head-bump snapping.
pub fn resolve_vertical(body: &mut Body, grid: &TileGrid, tuning: &Tuning) -> VerticalContact {
    let tile = tuning.tile_size;
    body.vel.y += tuning.gravity;
    let vy = body.vel.y;

    if vy >= 0.0 {
        // Falling: look at the row the feet will enter
        let next_bottom = body.bottom() + vy;
        let feet_row = world_to_cell(next_bottom, tile);
        let tile_top = feet_row as f32 * tile;

        for col in cols_spanned(body, tile) {
            if !grid.solid_at(feet_row, col) {
                continue;
            }
            // Only snap when the feet start near the surface, not deep inside it
            if body.bottom() <= tile_top + tuning.landing_tolerance {
                body.pos.y = tile_top - body.size.y;
                body.vel.y = 0.0;
                return VerticalContact::Landed { row: feet_row, col };
            }
        }
    } else {
        // Rising: look at the row the head will enter
        let head_row = world_to_cell(body.pos.y + vy, tile);
        let tile_bottom = (head_row + 1) as f32 * tile;

        for col in cols_spanned(body, tile) {
            if !grid.solid_at(head_row, col) {
                continue;
            }
            if body.pos.y >= tile_bottom - tuning.head_bump_tolerance {
                body.pos.y = tile_bottom;
                body.vel.y = tuning.head_bump_rebound;
                return VerticalContact::HeadBump { row: head_row, col };
            }
        }
    }

    body.pos.y += vy;
    VerticalContact::Airborne
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn grid(rows: &[&str]) -> TileGrid {
        TileGrid::parse(rows).unwrap()
    }

    fn player_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(42.0, 42.0))
    }

    #[test]
    fn test_landing_snaps_to_tile_top() {
        let g = grid(&["....", "....", "####"]);
        let tuning = Tuning::default();
        // Feet 6 units above row 2 (top at 128), falling at 10
        let mut body = player_at(10.0, 128.0 - 42.0 - 6.0);
        body.vel.y = 10.0;

        let contact = resolve_vertical(&mut body, &g, &tuning);
        assert!(matches!(contact, VerticalContact::Landed { row: 2, .. }));
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.bottom(), 128.0);
    }

    #[test]
    fn test_resting_body_stays_grounded() {
        let g = grid(&["....", "####"]);
        let tuning = Tuning::default();
        let mut body = player_at(70.0, 64.0 - 42.0);
        for _ in 0..10 {
            let contact = resolve_vertical(&mut body, &g, &tuning);
            assert!(matches!(contact, VerticalContact::Landed { .. }));
            assert_eq!(body.bottom(), 64.0);
        }
    }

    #[test]
    fn test_head_bump_rebounds() {
        let g = grid(&["#?##", "....", "...."]);
        let tuning = Tuning::default();
        // Head 8 units below row 0's bottom (64), moving up fast
        let mut body = player_at(70.0, 72.0);
        body.vel.y = -30.0;

        let contact = resolve_vertical(&mut body, &g, &tuning);
        assert_eq!(contact, VerticalContact::HeadBump { row: 0, col: 1 });
        assert_eq!(body.pos.y, 64.0);
        assert_eq!(body.vel.y, tuning.head_bump_rebound);
    }

    #[test]
    fn test_first_column_wins_tie_break() {
        // Body spans columns 0 and 1; both solid below
        let g = grid(&["....", "##.."]);
        let tuning = Tuning::default();
        let mut body = player_at(40.0, 64.0 - 42.0 - 1.0);
        let contact = resolve_vertical(&mut body, &g, &tuning);
        assert_eq!(contact, VerticalContact::Landed { row: 1, col: 0 });
    }

    #[test]
    fn test_wall_stops_player() {
        let g = grid(&["..#.", "..#."]);
        let mut body = player_at(80.0, 10.0);
        body.vel.x = 5.0;
        // Right edge at 122; wall starts at 128
        assert!(!resolve_horizontal(&mut body, &g, 64.0, WallResponse::Stop));
        assert_eq!(body.pos.x, 85.0);

        body.vel.x = 5.0;
        assert!(resolve_horizontal(&mut body, &g, 64.0, WallResponse::Stop));
        assert_eq!(body.pos.x, 128.0 - 42.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_wall_bounces_mushroom() {
        let g = grid(&["#..."]);
        let mut body = Body::new(Vec2::new(65.0, 10.0), Vec2::splat(48.0));
        body.vel.x = -2.0;
        assert!(resolve_horizontal(&mut body, &g, 64.0, WallResponse::Bounce));
        assert_eq!(body.pos.x, 64.0);
        assert_eq!(body.vel.x, 2.0);
    }

    #[test]
    fn test_walking_along_floor_is_not_blocked_by_it() {
        let g = grid(&["....", "####"]);
        let mut body = player_at(10.0, 64.0 - 42.0);
        body.vel.x = 5.0;
        for _ in 0..20 {
            resolve_horizontal(&mut body, &g, 64.0, WallResponse::Stop);
        }
        assert_eq!(body.pos.x, 110.0);
    }

    #[test]
    fn test_leaving_grid_is_free_fall() {
        let g = grid(&["##"]);
        let tuning = Tuning::default();
        let mut body = player_at(500.0, 500.0);
        let contact = resolve_vertical(&mut body, &g, &tuning);
        assert_eq!(contact, VerticalContact::Airborne);
        assert_eq!(body.pos.y, 500.0 + tuning.gravity);
    }

    proptest! {
        #[test]
        fn free_fall_velocity_grows_by_gravity(
            x in 0.0f32..200.0,
            y in 0.0f32..50.0,
            ticks in 1usize..40,
        ) {
            // Nothing solid anywhere: every tick adds exactly one gravity step
            let g = grid(&["....", "....", "...."]);
            let tuning = Tuning::default();
            let mut body = player_at(x, y);
            for _ in 0..ticks {
                let before = body.vel.y;
                let contact = resolve_vertical(&mut body, &g, &tuning);
                prop_assert_eq!(contact, VerticalContact::Airborne);
                prop_assert_eq!(body.vel.y, before + tuning.gravity);
            }
        }

        #[test]
        fn landing_never_leaves_penetration(x in 0.0f32..200.0, gap in 1.0f32..150.0) {
            let g = grid(&[".....", ".....", ".....", "#####"]);
            let tuning = Tuning::default();
            let mut body = player_at(x, 192.0 - 42.0 - gap);
            for _ in 0..60 {
                if let VerticalContact::Landed { .. } = resolve_vertical(&mut body, &g, &tuning) {
                    break;
                }
            }
            prop_assert_eq!(body.bottom(), 192.0);
            prop_assert_eq!(body.vel.y, 0.0);
        }
    }
}
