//! Collision detection and consequence resolution
//!
//! Runs once per frame after the population update. The falling-object
//! collection is scanned in reverse index order so objects can be removed
//! in place without skipping their neighbors.

use super::state::{FallingObject, GameEvent, GamePhase, GameState, ObjectKind, Paddle};
use crate::consts::*;

/// Strict AABB overlap between the paddle and an object (circle approximated
/// as its bounding box). Boundary contact is not a catch.
pub fn overlaps_paddle(paddle_x: f32, paddle_width: f32, obj: &FallingObject) -> bool {
    let x_dist = (obj.pos.x - paddle_x).abs();
    let y_dist = (obj.pos.y - Paddle::Y).abs();
    x_dist < paddle_width / 2.0 + obj.radius && y_dist < Paddle::HEIGHT / 2.0 + obj.radius
}

/// Scan the population, apply catch/miss consequences, and emit events.
///
/// Every removed object leaves exactly one particle behind. The terminal
/// check aborts the scan immediately; once the game is over nothing here
/// mutates state again until an explicit reset.
///
/// Miss policy: dropping a catchable (Bonus/Neutral) object costs a life and
/// checks game-over, mirroring the penalty-catch symmetry. A Penalty object
/// reaching the ground is a successful dodge and costs nothing.
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let now = state.sim_time;

    for i in (0..state.objects.len()).rev() {
        let obj = state.objects[i];

        if overlaps_paddle(state.paddle.x, state.paddle.width(), &obj) {
            state.objects.remove(i);
            state.spawn_particle(obj.pos, obj.kind);
            events.push(GameEvent::Caught(obj.kind));

            match obj.kind {
                ObjectKind::Penalty => {
                    state.lives -= 1;
                    state.shake.begin(now, SHAKE_DURATION);
                    state.paddle.flash(RED, now);
                    events.push(GameEvent::ScoreChanged {
                        score: state.score,
                        lives: state.lives,
                    });
                    if state.lives <= 0 {
                        state.trigger_game_over(events);
                        break;
                    }
                }
                ObjectKind::Bonus => {
                    state.score += 1;
                    if state.score % BONUS_LIFE_EVERY == 0 {
                        state.lives += 1;
                    }
                    state.paddle.flash(YELLOW, now);
                    events.push(GameEvent::ScoreChanged {
                        score: state.score,
                        lives: state.lives,
                    });
                }
                ObjectKind::Neutral => {
                    state.lives += 1;
                    state.paddle.flash(WHITE, now);
                    events.push(GameEvent::ScoreChanged {
                        score: state.score,
                        lives: state.lives,
                    });
                }
            }
        } else if obj.pos.y > GROUND_LEVEL {
            state.objects.remove(i);
            state.spawn_particle(obj.pos, obj.kind);
            events.push(GameEvent::Missed(obj.kind));

            if obj.kind != ObjectKind::Penalty {
                state.lives -= 1;
                state.shake.begin(now, SHAKE_DURATION);
                events.push(GameEvent::ScoreChanged {
                    score: state.score,
                    lives: state.lives,
                });
                if state.lives <= 0 {
                    state.trigger_game_over(events);
                    break;
                }
            }
        }
    }
}
