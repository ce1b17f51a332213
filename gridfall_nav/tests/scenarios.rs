// End-to-end pathfinding scenarios: full sessions against hand-built
// worlds, exercising the public API the way a host would.

use gridfall_nav::{
    Action, GridCoord, GridWorld, NavConfig, PathSession, PathStep, SearchStatus,
};

/// Flat solid floor at y = 0 over the whole footprint.
fn floored_world(size_x: u32, size_z: u32) -> GridWorld {
    let mut world = GridWorld::new(size_x, 6, size_z);
    for x in 0..size_x as i32 {
        for z in 0..size_z as i32 {
            world.set_occupancy(GridCoord::new(x, 0, z), 1);
        }
    }
    world
}

fn solve(world: &GridWorld, config: &NavConfig, start: GridCoord, goal: GridCoord) -> PathSession {
    let mut session = PathSession::new(world, config, start, goal);
    session.run_to_completion(world, config);
    session
}

fn final_pos(path: &[PathStep]) -> [f32; 3] {
    path.last().expect("path is never empty").pos
}

#[test]
fn open_floor_reaches_goal_directly() {
    let world = floored_world(16, 16);
    let config = NavConfig::default();
    let start = GridCoord::new(1, 0, 1);
    let goal = GridCoord::new(14, 0, 13);

    let mut session = solve(&world, &config, start, goal);
    assert_eq!(session.status(), SearchStatus::Completed);
    let path = session.take_path().unwrap();
    assert_eq!(path[0].pos, world.to_world(start));
    assert_eq!(final_pos(&path), world.to_world(goal));
    // Open ground, full visibility: the whole route is walked and the
    // parent chain collapses hard.
    assert!(path.iter().all(|s| s.action == Action::Walk));
    assert!(path.len() <= 3);
}

#[test]
fn single_gap_is_bridged_by_exactly_one_gap_jump() {
    // A one-cell-wide catwalk with one missing floor cell in the
    // middle. The jump is the only way across.
    let mut world = GridWorld::new(12, 6, 1);
    for x in 0..12 {
        world.set_occupancy(GridCoord::new(x, 0, 0), 1);
    }
    world.set_occupancy(GridCoord::new(6, 0, 0), 0);
    let config = NavConfig::default();
    let start = GridCoord::new(1, 0, 0);
    let goal = GridCoord::new(10, 0, 0);

    let mut session = solve(&world, &config, start, goal);
    assert_eq!(session.status(), SearchStatus::Completed);
    let path = session.take_path().unwrap();
    let gap_jumps = path.iter().filter(|s| s.action == Action::GapJump).count();
    assert_eq!(gap_jumps, 1);
    assert!(!path.iter().any(|s| s.action == Action::Fall));
    assert_eq!(final_pos(&path), world.to_world(goal));
}

#[test]
fn gap_jump_pays_its_configured_cost() {
    let mut narrow = floored_world(6, 3);
    narrow.set_occupancy(GridCoord::new(2, 0, 1), 0);
    // Wall off the side lanes so the only route is the jump.
    for z in [0, 2] {
        for x in 0..6 {
            world_block(&mut narrow, GridCoord::new(x, 0, z));
        }
    }
    let config = NavConfig::default();
    let start = GridCoord::new(1, 0, 1);
    let goal = GridCoord::new(3, 0, 1);

    let mut session = solve(&narrow, &config, start, goal);
    assert_eq!(session.status(), SearchStatus::Completed);
    let path = session.take_path().unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path[1].action, Action::GapJump);
    let cost = session.path_cost().unwrap();
    assert!((cost - config.gap_jump_cost).abs() < 1e-5);
}

/// Stack a column so the cell is solid with no headroom.
fn world_block(world: &mut GridWorld, coord: GridCoord) {
    world.set_occupancy(coord, 1);
    world.set_occupancy(coord.offset(0, 1, 0), 1);
}

#[test]
fn deep_pit_routes_down_with_falls_not_jumps() {
    // A descent staircase: the goal sits three cells below the start.
    // No candidate ever has a vertical reach beyond one, so the route
    // must be a chain of falls.
    let mut world = GridWorld::new(8, 8, 3);
    for x in 0..4 {
        world.set_occupancy(GridCoord::new(x, 3, 1), 1);
    }
    world.set_occupancy(GridCoord::new(4, 2, 1), 1);
    world.set_occupancy(GridCoord::new(5, 1, 1), 1);
    for x in 6..8 {
        world.set_occupancy(GridCoord::new(x, 0, 1), 1);
    }
    let config = NavConfig::default();
    let start = GridCoord::new(0, 3, 1);
    let goal = GridCoord::new(7, 0, 1);

    let mut session = solve(&world, &config, start, goal);
    assert_eq!(session.status(), SearchStatus::Completed);
    let path = session.take_path().unwrap();
    let falls = path.iter().filter(|s| s.action == Action::Fall).count();
    assert_eq!(falls, 3);
    assert!(!path.iter().any(|s| s.action == Action::Jump));
    assert_eq!(final_pos(&path), world.to_world(goal));
}

#[test]
fn unreachable_goal_delivers_degraded_path() {
    let mut world = GridWorld::new(16, 6, 3);
    for x in 0..5 {
        world.set_occupancy(GridCoord::new(x, 0, 1), 1);
    }
    // A three-cell chasm no action can cross, then the goal island.
    for x in 8..16 {
        world.set_occupancy(GridCoord::new(x, 0, 1), 1);
    }
    let config = NavConfig::default();
    let start = GridCoord::new(0, 0, 1);
    let goal = GridCoord::new(15, 0, 1);

    let mut session = solve(&world, &config, start, goal);
    assert_eq!(session.status(), SearchStatus::Exhausted);
    let path = session.take_path().unwrap();
    // The degraded result ends at the island edge nearest the goal —
    // the caller detects degradation by comparing against the goal.
    assert_eq!(final_pos(&path), world.to_world(GridCoord::new(4, 0, 1)));
    assert_ne!(final_pos(&path), world.to_world(goal));
}

#[test]
fn repeated_queries_cost_the_same() {
    let mut world = floored_world(16, 16);
    // Some clutter to make the search non-trivial.
    for z in 2..14 {
        world_block(&mut world, GridCoord::new(7, 0, z));
    }
    let config = NavConfig::default();
    let start = GridCoord::new(1, 0, 8);
    let goal = GridCoord::new(14, 0, 8);

    let mut first = solve(&world, &config, start, goal);
    let mut second = solve(&world, &config, start, goal);
    assert_eq!(first.status(), SearchStatus::Completed);
    assert_eq!(first.status(), second.status());
    assert_eq!(first.path_cost(), second.path_cost());
    // Deterministic tie-breaks: the routes are identical too.
    assert_eq!(first.take_path().unwrap(), second.take_path().unwrap());
}

#[test]
fn raising_an_action_cost_never_cheapens_the_path() {
    // A shelf route that requires one jump and one fall.
    let mut world = GridWorld::new(10, 6, 3);
    for x in 0..3 {
        world.set_occupancy(GridCoord::new(x, 0, 1), 1);
    }
    for x in 3..7 {
        world.set_occupancy(GridCoord::new(x, 1, 1), 1);
    }
    for x in 7..10 {
        world.set_occupancy(GridCoord::new(x, 0, 1), 1);
    }
    let start = GridCoord::new(0, 0, 1);
    let goal = GridCoord::new(9, 0, 1);

    let base = NavConfig::default();
    let base_session = solve(&world, &base, start, goal);
    assert_eq!(base_session.status(), SearchStatus::Completed);
    let base_cost = base_session.path_cost().unwrap();

    for raised in [
        NavConfig { jump_cost: base.jump_cost * 3.0, ..base.clone() },
        NavConfig { fall_cost: base.fall_cost * 3.0, ..base.clone() },
        NavConfig { gap_jump_cost: base.gap_jump_cost * 3.0, ..base.clone() },
    ] {
        let session = solve(&world, &raised, start, goal);
        assert_eq!(session.status(), SearchStatus::Completed);
        assert!(session.path_cost().unwrap() >= base_cost - 1e-5);
    }
}

#[test]
fn session_interleaves_with_host_ticks() {
    let world = floored_world(24, 24);
    let config = NavConfig {
        expansions_per_step: 4,
        ..NavConfig::default()
    };
    let start = GridCoord::new(0, 0, 0);
    let goal = GridCoord::new(23, 0, 23);

    let mut session = PathSession::new(&world, &config, start, goal);
    let mut ticks = 0u32;
    while session.step(&world, &config) == SearchStatus::Running {
        ticks += 1;
        assert!(ticks < 100_000, "search failed to terminate");
    }
    assert_eq!(session.status(), SearchStatus::Completed);
    // No partial batch ever exceeded the budget.
    assert!(session.expansions() <= u64::from(ticks + 1) * 4);
    assert!(session.take_path().is_some());
}

#[test]
fn goal_contact_feeds_the_session() {
    use gridfall_nav::GOAL_CONTACT;

    let mut world = floored_world(8, 3);
    world.set_occupancy(GridCoord::new(1, 0, 1), GOAL_CONTACT);
    world.set_occupancy(GridCoord::new(6, 0, 1), GOAL_CONTACT);
    let config = NavConfig::default();

    let start = world.goal_contact([1.2, 4.0, 1.7]).unwrap();
    let goal = world.goal_contact([6.9, 4.0, 1.1]).unwrap();
    assert_eq!(start, GridCoord::new(1, 0, 1));
    assert_eq!(goal, GridCoord::new(6, 0, 1));

    let mut session = solve(&world, &config, start, goal);
    assert_eq!(session.status(), SearchStatus::Completed);
    assert_eq!(final_pos(&session.take_path().unwrap()), world.to_world(goal));
}
