use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws attempted before falling back to enumerating free cells.
const MAX_SAMPLING_ATTEMPTS: usize = 64;

/// Spawns a uniformly random position that is not occupied by the snake.
///
/// Rejection-samples the grid first; on a crowded board it picks among the
/// enumerated free cells instead. Returns `None` when the snake covers
/// every cell.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    let count = i32::from(bounds.count());
    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..count), rng.gen_range(0..count));
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let candidates: Vec<Position> = free_cells(bounds, snake).collect();
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

/// Iterates over every grid cell the snake does not occupy, row by row.
pub fn free_cells(bounds: GridSize, snake: &Snake) -> impl Iterator<Item = Position> + '_ {
    bounds
        .cells()
        .filter(|position| !snake.occupies(*position))
}
