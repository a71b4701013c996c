use crate::games::SessionRng;
use super::geometry;
use super::entity::SnakeEntity;
use super::types::{GameMode, GameStatus, TickOutcome};

/// Advances `entity` by one step.
///
/// Order is fixed: commit the buffered direction, move the head, check walls,
/// check the body, then either grow onto food or drop the tail. The body check
/// runs against the pre-move body, so stepping into the cell the tail is about
/// to leave is a collision.
///
/// High scores are not tracked here; the owner reacts to the returned outcome.
pub fn tick(entity: &mut SnakeEntity, rng: &mut SessionRng) -> TickOutcome {
    if entity.status != GameStatus::Playing {
        return TickOutcome::Skipped;
    }

    entity.direction = entity.pending_direction;

    let grid_size = entity.settings.grid_size;
    let raw_head = geometry::advance(entity.head(), entity.direction);
    let head = geometry::apply_mode(raw_head, entity.mode, grid_size);

    if entity.mode == GameMode::Walls && geometry::is_out_of_bounds(head, grid_size) {
        entity.status = GameStatus::GameOver;
        return TickOutcome::WallCollision;
    }

    if geometry::collides_with_body(head, &entity.body) {
        entity.status = GameStatus::GameOver;
        return TickOutcome::SelfCollision;
    }

    entity.body.push_front(head);

    if head == entity.food {
        entity.score = entity.score.saturating_add(entity.settings.food_score);
        entity.speed = entity.settings.speed_for_score(entity.score);
        entity.place_food(rng);
        TickOutcome::AteFood
    } else {
        entity.body.pop_back();
        TickOutcome::Moved
    }
}
