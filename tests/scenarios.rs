//! End-to-end update scenarios

use glam::Vec2;

use ricochet::config::{CellSizing, NeighborSnapshot, SimConfig};
use ricochet::{Simulation, Wall};

fn sim_with(snapshot: NeighborSnapshot) -> Simulation {
    Simulation::new(SimConfig {
        neighbor_snapshot: snapshot,
        ..SimConfig::default()
    })
}

#[test]
fn test_ball_passes_through_wall_in_one_step() {
    // Wall walked upward along x=5, normal points to -x
    let mut sim = Simulation::default();
    sim.add_wall(Wall::new(5.0, -10.0, 5.0, 10.0));
    sim.add_ball(0.0, 0.0, 10.0, 0.0, 1.0);

    sim.update(1.0);

    let ball = sim.balls()[0];
    // No swept detection: the ball lands on the far side
    assert_eq!(ball.position, Vec2::new(10.0, 0.0));
    // The check runs on the integrated position, which is behind the line
    // (signed distance -5 < radius), so the velocity flips
    assert_eq!(ball.velocity, Vec2::new(-10.0, 0.0));
}

#[test]
fn test_wall_check_uses_integrated_position() {
    // Same line walked downward: normal points to +x, so the landing spot
    // at x=10 is 5 units clear
    let mut sim = Simulation::default();
    sim.add_wall(Wall::new(5.0, 10.0, 5.0, -10.0));
    sim.add_ball(0.0, 0.0, 10.0, 0.0, 1.0);

    sim.update(1.0);

    let ball = sim.balls()[0];
    assert_eq!(ball.position, Vec2::new(10.0, 0.0));
    assert_eq!(ball.velocity, Vec2::new(10.0, 0.0));
}

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn test_overlapping_pair_reflects_both() {
    for snapshot in [NeighborSnapshot::FrameStart, NeighborSnapshot::Integrated] {
        let mut sim = sim_with(snapshot);
        sim.add_ball(0.0, 0.0, 2.0, 0.0, 1.0);
        sim.add_ball(1.0, 0.0, -1.0, 0.0, 1.0);
        assert_eq!(sim.grid_index_of(&sim.balls()[0]), sim.grid_index_of(&sim.balls()[1]));

        let stats = sim.update(0.01);

        assert_eq!(stats.ball_hits, 2, "{snapshot:?}");
        // Ball 0 bounced off (1, 0), ball 1 off (-1, 0)
        assert!(approx(sim.balls()[0].velocity, Vec2::new(-2.0, 0.0)), "{snapshot:?}");
        assert!(approx(sim.balls()[1].velocity, Vec2::new(1.0, 0.0)), "{snapshot:?}");
    }
}

#[test]
fn test_out_of_grid_ball_skips_ball_checks() {
    let mut sim = Simulation::default();
    // Vertical wall at x=-161 walked downward, normal +x
    sim.add_wall(Wall::new(-161.0, 100.0, -161.0, -100.0));
    // Cell width is 160 for radius 1: ball 0 truncates into column 0,
    // ball 1 lands in column -1
    sim.add_ball(-159.5, 5.0, 1.0, 0.0, 1.0);
    sim.add_ball(-160.5, 5.0, -1.0, 0.0, 1.0);
    assert_eq!(sim.grid_index_of(&sim.balls()[0]), (0, 0));
    assert_eq!(sim.grid_index_of(&sim.balls()[1]), (-1, 0));

    let stats = sim.update(0.01);

    // Ball 1 moved and bounced off the wall...
    assert!((sim.balls()[1].position.x + 160.51).abs() < 1e-3);
    assert_eq!(sim.balls()[1].velocity, Vec2::new(1.0, 0.0));
    // ...but neither ball saw the other even though they overlap
    assert_eq!(stats.wall_hits, 1);
    assert_eq!(stats.ball_hits, 0);
    assert_eq!(stats.gridded, 1);
    assert_eq!(sim.balls()[0].velocity, Vec2::new(1.0, 0.0));
    assert_eq!(sim.grid().cell((0, 0)), &[0]);
}

#[test]
fn test_ball_left_of_origin_shares_first_cell() {
    // Index division truncates toward zero, so x = -0.5 is still column 0
    let mut sim = Simulation::default();
    sim.add_ball(-0.5, 5.0, -1.0, 0.0, 1.0);
    sim.add_ball(0.5, 5.0, 1.0, 0.0, 1.0);
    assert_eq!(sim.grid_index_of(&sim.balls()[0]), (0, 0));

    let stats = sim.update(0.0);

    assert_eq!(stats.gridded, 2);
    assert_eq!(stats.ball_hits, 2);
    assert_eq!(sim.balls()[0].velocity, Vec2::new(1.0, 0.0));
    assert_eq!(sim.balls()[1].velocity, Vec2::new(-1.0, 0.0));
}

#[test]
fn test_rectangle_wall_square() {
    let mut sim = Simulation::default();
    sim.add_rectangle_wall(0.0, 0.0, 2.0, 2.0, 0.0);

    let corners: Vec<Vec2> = sim.walls().iter().map(Wall::start).collect();
    assert_eq!(
        corners,
        vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
        ]
    );
    for (i, wall) in sim.walls().iter().enumerate() {
        assert_eq!(wall.end(), corners[(i + 1) % 4]);
    }
}

/// Ball 1 starts three cells away and lands next to ball 0 in one step.
fn approaching_pair(snapshot: NeighborSnapshot) -> Simulation {
    let mut sim = Simulation::new(SimConfig {
        grid_width_cells: 10,
        grid_height_cells: 10,
        cell_sizing: CellSizing::Fixed { cell_size: 10.0 },
        neighbor_snapshot: snapshot,
    });
    sim.add_ball(5.0, 5.0, 1.0, 0.0, 1.0);
    sim.add_ball(35.0, 5.0, -28.0, 0.0, 1.0);
    sim.update(1.0);
    sim
}

#[test]
fn test_frame_start_snapshot_is_stale_for_earlier_balls() {
    let sim = approaching_pair(NeighborSnapshot::FrameStart);
    assert_eq!(sim.balls()[0].position, Vec2::new(6.0, 5.0));
    assert_eq!(sim.balls()[1].position, Vec2::new(7.0, 5.0));
    // Ball 0 was looked up before ball 1 moved into its block
    assert_eq!(sim.balls()[0].velocity, Vec2::new(1.0, 0.0));
    // Ball 1 finds ball 0 in the snapshot from its new cell
    assert_eq!(sim.balls()[1].velocity, Vec2::new(28.0, 0.0));
}

#[test]
fn test_integrated_snapshot_sees_this_frame() {
    let sim = approaching_pair(NeighborSnapshot::Integrated);
    assert_eq!(sim.balls()[0].velocity, Vec2::new(-1.0, 0.0));
    assert_eq!(sim.balls()[1].velocity, Vec2::new(28.0, 0.0));
}

#[test]
fn test_mixed_radii_bucket_on_different_grids() {
    // Overlapping small and large balls land in different cells when cell
    // size follows each ball's radius
    let place = |sizing| {
        let mut sim = Simulation::new(SimConfig {
            cell_sizing: sizing,
            ..SimConfig::default()
        });
        sim.add_ball(330.0, 10.0, 1.0, 0.0, 1.0);
        sim.add_ball(340.0, 10.0, -1.0, 0.0, 10.0);
        sim
    };

    let mut per_radius = place(CellSizing::PerBallRadius);
    assert_eq!(per_radius.grid_index_of(&per_radius.balls()[0]), (2, 0));
    assert_eq!(per_radius.grid_index_of(&per_radius.balls()[1]), (0, 0));
    assert_eq!(per_radius.update(0.0).ball_hits, 0);

    let mut fixed = place(CellSizing::Fixed { cell_size: 50.0 });
    assert_eq!(fixed.update(0.0).ball_hits, 2);
    assert_eq!(fixed.balls()[0].velocity, Vec2::new(-1.0, 0.0));
    assert_eq!(fixed.balls()[1].velocity, Vec2::new(1.0, 0.0));
}

#[test]
fn test_reflections_preserve_speed() {
    use ricochet::{FrameInput, Rotation, Sandbox, SceneConfig};

    let mut scene = SceneConfig::default();
    scene.seed = 42;
    let mut sandbox = Sandbox::new(scene);
    for _ in 0..20 {
        let at = sandbox.random_point_in_arena();
        sandbox.spawn_ball(at);
    }
    let initial: Vec<f32> = sandbox
        .simulation()
        .balls()
        .iter()
        .map(|b| b.velocity.length())
        .collect();

    let input = FrameInput {
        rotate: Rotation::Counterclockwise,
        ..Default::default()
    };
    let mut wall_hits = 0;
    for _ in 0..2000 {
        wall_hits += sandbox.step(&input).wall_hits;
    }
    assert!(wall_hits > 0);

    for (ball, speed) in sandbox.simulation().balls().iter().zip(initial) {
        let now = ball.velocity.length();
        assert!((now - speed).abs() <= speed * 0.005 + 1e-3, "{speed} -> {now}");
    }
}
