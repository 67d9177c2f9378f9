//! Greedy demo steering
//!
//! Heads for the current target, or for the nearest exit once none is left.
//! It only looks half a tile ahead, so it happily walks into dead ends.

use glam::Vec2;

use super::collision::point_in_circle;
use super::round::Round;
use super::state::Direction;
use crate::error::SimError;

/// Direction the worm should turn to, or `None` to keep going
pub fn choose_direction(round: &Round) -> Result<Option<Direction>, SimError> {
    let worm = round.worm()?;
    let grid = round.grid()?;
    let head = worm.head()?;
    let current = worm.direction()?;
    let segments = worm.segments()?;

    let goal = match round.target()? {
        Some(target) => target.center()?,
        None => match nearest_exit(round, head)? {
            Some(exit) => exit,
            None => return Ok(None),
        },
    };

    let reach = grid.tile_size().x / 2.0;
    let clearance = round.config.self_collision_radius;

    let best = Direction::ALL
        .into_iter()
        .filter(|&dir| dir != current.reverse())
        .filter_map(|dir| {
            let ahead = head + dir.unit() * reach;
            if grid.solid_tile_at(ahead).is_some() {
                return None;
            }
            if segments
                .iter()
                .any(|&segment| point_in_circle(segment, ahead, clearance))
            {
                return None;
            }
            Some((dir, ahead.distance(goal)))
        })
        .min_by(|(a_dir, a_dist), (b_dir, b_dist)| {
            a_dist
                .partial_cmp(b_dist)
                .unwrap_or(std::cmp::Ordering::Equal)
                // keep heading on ties
                .then_with(|| (*a_dir != current).cmp(&(*b_dir != current)))
        });

    Ok(match best {
        Some((dir, _)) if dir != current => Some(dir),
        _ => None,
    })
}

fn nearest_exit(round: &Round, from: Vec2) -> Result<Option<Vec2>, SimError> {
    Ok(round
        .grid()?
        .exits()
        .map(|tile| tile.center())
        .min_by(|a, b| {
            a.distance(from)
                .partial_cmp(&b.distance(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::fixtures;
    use crate::sim::{RoundPhase, Target, test_config};

    const ROOM: &[&str] = &["#####", "#S..#", "#...#", "#..E#", "#####"];

    fn started(targets: u32, dir: Direction) -> Round {
        let level = fixtures::level(ROOM, targets, dir);
        let mut round = Round::new(&level, &fixtures::tileset(), test_config(), 5).unwrap();
        round.begin().unwrap();
        round
    }

    #[test]
    fn test_turns_away_from_wall_toward_target() {
        let mut round = started(1, Direction::N);
        round.target = Some(Target::new(Vec2::new(80.0, 40.0), 8.0));
        assert_eq!(choose_direction(&round).unwrap(), Some(Direction::E));
    }

    #[test]
    fn test_keeps_heading_on_tie() {
        // exit centre is equally far from the east and south look-ahead points
        let round = started(0, Direction::E);
        assert_eq!(choose_direction(&round).unwrap(), None);
    }

    #[test]
    fn test_steers_round_to_the_exit() {
        let mut round = started(0, Direction::N);
        let mut now = 0.0;
        while round.phase().unwrap() == RoundPhase::Running && now < 2000.0 {
            if let Some(dir) = choose_direction(&round).unwrap() {
                round.change_dir(dir).unwrap();
            }
            round.tick(now).unwrap();
            now += 4.0;
        }
        assert_eq!(round.phase().unwrap(), RoundPhase::Won);
    }
}
