use snake_common::games::snake::{
    advance, apply_mode, collides_with_body, is_out_of_bounds, Direction, GameMode, Point,
    SnakeEntity,
};

/// Greedy autopilot for the demo session: closest safe step toward the food.
pub struct BotController;

impl BotController {
    pub fn calculate_move(entity: &SnakeEntity) -> Option<Direction> {
        let current_direction = entity.direction;

        let mut best_dir = None;
        let mut best_distance = i32::MAX;

        for dir in Self::get_valid_directions(current_direction) {
            let Some(next_pos) = Self::calculate_next_position(entity, dir) else {
                continue;
            };
            if !Self::is_safe_position(entity, next_pos) {
                continue;
            }

            let distance = Self::manhattan_distance(entity, next_pos, entity.food);
            if distance < best_distance {
                best_distance = distance;
                best_dir = Some(dir);
            }
        }

        best_dir
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn calculate_next_position(entity: &SnakeEntity, direction: Direction) -> Option<Point> {
        let grid_size = entity.settings.grid_size;
        let next = apply_mode(advance(entity.head(), direction), entity.mode, grid_size);
        if entity.mode == GameMode::Walls && is_out_of_bounds(next, grid_size) {
            return None;
        }
        Some(next)
    }

    // The engine treats the vacating tail as occupied, so the bot does too.
    fn is_safe_position(entity: &SnakeEntity, pos: Point) -> bool {
        !collides_with_body(pos, &entity.body)
    }

    fn manhattan_distance(entity: &SnakeEntity, a: Point, b: Point) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();

        match entity.mode {
            GameMode::Walls => dx + dy,
            GameMode::PassThrough => {
                let size = entity.settings.grid_size;
                dx.min(size - dx) + dy.min(size - dy)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use snake_common::games::SessionRng;
    use snake_common::games::snake::{GameStatus, SnakeSettings};

    fn entity_at(body: &[(i32, i32)], direction: Direction, mode: GameMode, food: (i32, i32)) -> SnakeEntity {
        let mut rng = SessionRng::new(42);
        let mut entity = SnakeEntity::new(SnakeSettings::default(), mode, &mut rng);
        entity.body = body.iter().map(|&(x, y)| Point::new(x, y)).collect::<VecDeque<_>>();
        entity.direction = direction;
        entity.pending_direction = direction;
        entity.status = GameStatus::Playing;
        entity.food = Point::new(food.0, food.1);
        entity
    }

    #[test]
    fn test_heads_toward_food() {
        let entity = entity_at(&[(10, 10), (9, 10), (8, 10)], Direction::Right, GameMode::Walls, (10, 3));
        assert_eq!(BotController::calculate_move(&entity), Some(Direction::Up));
    }

    #[test]
    fn test_avoids_wall() {
        let entity = entity_at(&[(19, 10), (18, 10), (17, 10)], Direction::Right, GameMode::Walls, (19, 10));
        let choice = BotController::calculate_move(&entity);
        assert!(matches!(choice, Some(Direction::Up) | Some(Direction::Down)));
    }

    #[test]
    fn test_uses_wrap_distance() {
        let entity = entity_at(&[(1, 10), (2, 10), (3, 10)], Direction::Left, GameMode::PassThrough, (18, 10));
        assert_eq!(BotController::calculate_move(&entity), Some(Direction::Left));
    }

    #[test]
    fn test_boxed_in_has_no_move() {
        let entity = entity_at(
            &[(0, 0), (1, 0), (1, 1), (0, 1)],
            Direction::Up,
            GameMode::Walls,
            (5, 5),
        );
        assert_eq!(BotController::calculate_move(&entity), None);
    }
}
