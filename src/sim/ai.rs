//! Enemy patrol and pickup motion
//!
//! Enemies walk a fixed horizontal band and ignore terrain. Mushrooms fall
//! under gravity and bounce off walls.

use super::grid::TileGrid;
use super::kinematics::{self, WallResponse};
use super::state::{Enemy, Mushroom};
use crate::tuning::Tuning;

/// Advance one enemy along its patrol band
pub fn patrol(enemy: &mut Enemy) {
    if !enemy.alive {
        return;
    }
    enemy.pos.x += enemy.speed * enemy.direction;

    if enemy.pos.x <= enemy.origin_x - enemy.patrol_range
        || enemy.pos.x >= enemy.origin_x + enemy.patrol_range
    {
        enemy.direction = -enemy.direction;
    }
}

/// Move a mushroom: bounce off walls, fall onto floors
pub fn update_mushroom(mushroom: &mut Mushroom, grid: &TileGrid, tuning: &Tuning) {
    if !mushroom.active {
        return;
    }
    kinematics::resolve_horizontal(&mut mushroom.body, grid, tuning.tile_size, WallResponse::Bounce);
    kinematics::resolve_vertical(&mut mushroom.body, grid, tuning);
}
