//! Whole-piece placement planning
//!
//! A placement is a target orientation (quarter turns about X, then Y, then
//! Z) plus a horizontal shift, finished by a hard drop. Plans are executed
//! through the ordinary session calls, so kicks and collisions apply
//! exactly as they would for a player.

use crate::core::{Phase, Pit, Session};
use crate::types::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Placement {
    pub x_turns: i8,
    pub y_turns: i8,
    pub z_turns: i8,
    pub dx: i32,
    pub dy: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationBlocked,
    MoveBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked | PlaceError::MoveBlocked => "invalid_place",
            PlaceError::NotPlayable => "not_playable",
            PlaceError::NoActive => "no_active",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target orientation",
            PlaceError::MoveBlocked => "could not shift to target position due to collision",
            PlaceError::NotPlayable => "session is not running",
            PlaceError::NoActive => "no active piece",
        }
    }
}

/// Rotate, shift one cell at a time, then hard drop
pub fn apply_place(session: &mut Session, placement: Placement) -> Result<(), PlaceError> {
    if session.phase() != Phase::Running {
        return Err(PlaceError::NotPlayable);
    }
    if session.current_piece().is_none() {
        return Err(PlaceError::NoActive);
    }

    for (axis, turns) in [
        (Axis::X, placement.x_turns),
        (Axis::Y, placement.y_turns),
        (Axis::Z, placement.z_turns),
    ] {
        if turns.rem_euclid(4) != 0 && !session.rotate_piece(axis, turns) {
            return Err(PlaceError::RotationBlocked);
        }
    }

    for _ in 0..placement.dx.abs() {
        if !session.move_piece(placement.dx.signum(), 0, 0) {
            return Err(PlaceError::MoveBlocked);
        }
    }
    for _ in 0..placement.dy.abs() {
        if !session.move_piece(0, placement.dy.signum(), 0) {
            return Err(PlaceError::MoveBlocked);
        }
    }

    if !session.drop_piece() {
        return Err(PlaceError::NotPlayable);
    }
    Ok(())
}

/// Empty cells with an occupied cell somewhere above them
pub fn covered_holes(pit: &Pit) -> u32 {
    let mut holes = 0;
    for y in 0..pit.depth() {
        for x in 0..pit.width() {
            let mut roofed = false;
            for z in (0..pit.height()).rev() {
                if pit.is_occupied(x, y, z) {
                    roofed = true;
                } else if roofed {
                    holes += 1;
                }
            }
        }
    }
    holes
}

/// Higher is better: points first, then a low flat stack
fn evaluate(session: &Session) -> i64 {
    if session.is_game_over() {
        return i64::MIN;
    }
    let pit = session.pit();
    let stack = pit.highest_occupied_z().map_or(0, |z| z + 1);
    i64::from(session.score()) * 4 - i64::from(stack) * 40 - i64::from(covered_holes(pit)) * 25
}

/// Try every orientation and shift on a scratch copy; keep the best
pub fn best_placement(session: &Session) -> Option<Placement> {
    let reach_x = session.pit().width() - 1;
    let reach_y = session.pit().depth() - 1;

    let mut best: Option<(i64, Placement)> = None;
    for x_turns in 0..4 {
        for y_turns in 0..4 {
            for z_turns in 0..4 {
                for dx in -reach_x..=reach_x {
                    for dy in -reach_y..=reach_y {
                        let placement = Placement {
                            x_turns,
                            y_turns,
                            z_turns,
                            dx,
                            dy,
                        };
                        let mut scratch = session.clone();
                        if apply_place(&mut scratch, placement).is_err() {
                            continue;
                        }
                        let value = evaluate(&scratch);
                        if best.map_or(true, |(v, _)| value > v) {
                            best = Some((value, placement));
                        }
                    }
                }
            }
        }
    }
    best.map(|(_, placement)| placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PitConfig;

    fn quiet() -> PitConfig {
        PitConfig {
            special_min_interval: 1000,
            special_max_interval: 1000,
            ..PitConfig::default()
        }
    }

    #[test]
    fn place_rejected_when_not_running() {
        let mut session = Session::new(quiet(), 1).unwrap();
        let err = apply_place(&mut session, Placement::default()).unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);

        session.start();
        assert!(session.pause());
        let err = apply_place(&mut session, Placement::default()).unwrap_err();
        assert_eq!(err.code(), "not_playable");
    }

    #[test]
    fn place_rejected_when_shift_leaves_pit() {
        let mut session = Session::new(quiet(), 1).unwrap();
        session.start();
        let placement = Placement {
            dx: -50,
            ..Placement::default()
        };
        assert_eq!(
            apply_place(&mut session, placement),
            Err(PlaceError::MoveBlocked)
        );
        assert_eq!(session.blocks_placed(), 0);
    }

    #[test]
    fn default_placement_drops_in_place() {
        let mut session = Session::new(quiet(), 1).unwrap();
        session.start();
        assert_eq!(apply_place(&mut session, Placement::default()), Ok(()));
        assert_eq!(session.blocks_placed(), 1);
    }

    #[test]
    fn covered_holes_counts_roofed_cells() {
        let mut session = Session::new(quiet(), 1).unwrap();
        let content = crate::types::CellContent {
            color: crate::types::Rgb::new(1, 1, 1),
        };
        session.pit_mut().set(0, 0, 2, Some(content));
        session.pit_mut().set(1, 1, 0, Some(content));
        assert_eq!(covered_holes(session.pit()), 2);
    }

    #[test]
    fn best_placement_is_playable() {
        let mut session = Session::new(quiet(), 5).unwrap();
        session.start();
        let placement = best_placement(&session).unwrap();
        assert_eq!(apply_place(&mut session, placement), Ok(()));
        // Every level-1 shape lies flat, so the best plan keeps the stack one layer tall
        assert_eq!(session.pit().highest_occupied_z(), Some(0));
    }
}
