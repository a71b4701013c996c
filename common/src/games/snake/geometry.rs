use super::types::{Direction, GameMode, Point};
use crate::games::SessionRng;

const RANDOM_FOOD_ATTEMPTS: usize = 1000;

pub fn advance(position: Point, direction: Direction) -> Point {
    let (dx, dy) = direction.delta();
    Point::new(position.x + dx, position.y + dy)
}

/// An empty grid has nothing to wrap onto, so the position is returned as is.
pub fn apply_mode(position: Point, mode: GameMode, grid_size: i32) -> Point {
    match mode {
        GameMode::Walls => position,
        GameMode::PassThrough if grid_size <= 0 => position,
        GameMode::PassThrough => Point::new(
            position.x.rem_euclid(grid_size),
            position.y.rem_euclid(grid_size),
        ),
    }
}

pub fn is_out_of_bounds(position: Point, grid_size: i32) -> bool {
    !(0..grid_size).contains(&position.x) || !(0..grid_size).contains(&position.y)
}

pub fn collides_with_body<'a, I>(position: Point, body: I) -> bool
where
    I: IntoIterator<Item = &'a Point>,
{
    body.into_iter().any(|segment| *segment == position)
}

/// Uniform free cell outside `body`. Falls back to a scan once random draws
/// keep landing on the snake; `None` only when the board is full.
pub fn spawn_food<'a, I>(body: I, grid_size: i32, rng: &mut SessionRng) -> Option<Point>
where
    I: IntoIterator<Item = &'a Point> + Clone,
{
    if grid_size <= 0 {
        return None;
    }

    for _ in 0..RANDOM_FOOD_ATTEMPTS {
        let candidate = Point::new(rng.random_range(0..grid_size), rng.random_range(0..grid_size));
        if !collides_with_body(candidate, body.clone()) {
            return Some(candidate);
        }
    }

    let free: Vec<Point> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Point::new(x, y)))
        .filter(|cell| !collides_with_body(*cell, body.clone()))
        .collect();
    rng.choose(&free)
}
