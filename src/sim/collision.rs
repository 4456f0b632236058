//! Collision detection for agents, projectiles and obstacles
//!
//! Movement is resolved one axis at a time: the X move is tried with the old
//! Y, then the Y move with whatever X was accepted. A diagonal step into a wall
//! therefore keeps its tangential component and the agent slides along it.

use glam::Vec2;

use super::obstacle::Obstacle;

/// True if a circle at `pos` would overlap any obstacle
pub fn blocked(pos: Vec2, radius: f32, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|obs| obs.overlaps_circle(pos, radius))
}

/// Move from `pos` by `delta`, resolving each axis against the obstacles
///
/// Returns the accepted position.
pub fn slide_move(pos: Vec2, delta: Vec2, radius: f32, obstacles: &[Obstacle]) -> Vec2 {
    let mut out = pos;

    let candidate_x = Vec2::new(pos.x + delta.x, out.y);
    if !blocked(candidate_x, radius, obstacles) {
        out.x = candidate_x.x;
    }

    let candidate_y = Vec2::new(out.x, pos.y + delta.y);
    if !blocked(candidate_y, radius, obstacles) {
        out.y = candidate_y.y;
    }

    out
}

/// True if a projectile centre sits inside any obstacle
pub fn projectile_in_obstacle(point: Vec2, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|obs| obs.contains_point(point))
}

/// True if a point has left the field `[0, width] x [0, height]`
pub fn out_of_bounds(point: Vec2, width: f32, height: f32) -> bool {
    point.x < 0.0 || point.x > width || point.y < 0.0 || point.y > height
}

/// Circle test between a projectile and an agent
pub fn projectile_hits(
    projectile_pos: Vec2,
    projectile_radius: f32,
    agent_pos: Vec2,
    agent_radius: f32,
) -> bool {
    projectile_pos.distance(agent_pos) < agent_radius + projectile_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wall() -> Vec<Obstacle> {
        vec![Obstacle::new(100.0, 0.0, 20.0, 500.0)]
    }

    #[test]
    fn test_free_move() {
        let pos = slide_move(Vec2::new(10.0, 10.0), Vec2::new(5.0, -3.0), 5.0, &[]);
        assert_eq!(pos, Vec2::new(15.0, 7.0));
    }

    #[test]
    fn test_slides_along_wall() {
        // Moving diagonally into a vertical wall: X blocked, Y still applies
        let start = Vec2::new(85.0, 200.0);
        let pos = slide_move(start, Vec2::new(10.0, 10.0), 10.0, &wall());
        assert_eq!(pos.x, 85.0);
        assert_eq!(pos.y, 210.0);
    }

    #[test]
    fn test_y_check_uses_accepted_x() {
        // X step clears the box corner, so Y must be tested at the new X
        let obs = vec![Obstacle::new(0.0, 0.0, 50.0, 50.0)];
        let start = Vec2::new(52.0, 65.0);
        let pos = slide_move(start, Vec2::new(10.0, -15.0), 5.0, &obs);
        assert_eq!(pos, Vec2::new(62.0, 50.0));
    }

    #[test]
    fn test_projectile_obstacle_and_bounds() {
        let obs = wall();
        assert!(projectile_in_obstacle(Vec2::new(110.0, 10.0), &obs));
        assert!(!projectile_in_obstacle(Vec2::new(100.0, 10.0), &obs));
        assert!(out_of_bounds(Vec2::new(-0.1, 5.0), 100.0, 100.0));
        assert!(out_of_bounds(Vec2::new(5.0, 100.1), 100.0, 100.0));
        assert!(!out_of_bounds(Vec2::new(100.0, 0.0), 100.0, 100.0));
    }

    #[test]
    fn test_projectile_hit_radius() {
        let agent = Vec2::new(0.0, 0.0);
        assert!(projectile_hits(Vec2::new(24.9, 0.0), 5.0, agent, 20.0));
        assert!(!projectile_hits(Vec2::new(25.0, 0.0), 5.0, agent, 20.0));
    }

    proptest! {
        #[test]
        fn prop_slide_never_enters_obstacle(
            steps in proptest::collection::vec((-30.0f32..30.0, -30.0f32..30.0), 1..64),
        ) {
            let obstacles = vec![
                Obstacle::new(100.0, 100.0, 60.0, 60.0),
                Obstacle::new(200.0, 40.0, 30.0, 200.0),
            ];
            let radius = 12.0;
            let mut pos = Vec2::new(150.0, 50.0);
            prop_assume!(!blocked(pos, radius, &obstacles));
            for (dx, dy) in steps {
                pos = slide_move(pos, Vec2::new(dx, dy), radius, &obstacles);
                prop_assert!(!blocked(pos, radius, &obstacles));
            }
        }
    }
}
