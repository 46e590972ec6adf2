//! NavigationPlugin integration test
//!
//! Headless App: bake и перемещение через events, Transform связанной entity
//! синхронизируется с агентом, AgentArrived приходит один раз.

use bevy::prelude::*;
use waymark_nav::navigation::tick_navigation;
use waymark_nav::*;

/// Накопитель AgentArrived (Events живут только два update цикла)
#[derive(Resource, Default)]
struct Arrivals(Vec<AgentArrived>);

fn collect_arrivals(mut events: EventReader<AgentArrived>, mut arrivals: ResMut<Arrivals>) {
    arrivals.0.extend(events.read().cloned());
}

fn chain_app() -> (App, Vec<NodeId>) {
    let mut config = NavigationConfig::default();
    config.graph.connect_distance = 6.0;
    config.agent.speed = 1.0;

    let mut app = create_headless_app(config);
    app.init_resource::<Arrivals>()
        .add_systems(FixedUpdate, collect_arrivals.after(tick_navigation));
    let ids = {
        let mut navigation = app.world_mut().resource_mut::<Navigation>();
        [0.0, 5.0, 10.0]
            .into_iter()
            .map(|x| navigation.add_node(Anchor::point(Vec3::new(x, 0.0, 0.0))))
            .collect()
    };
    (app, ids)
}

/// Helper: прогнать N тиков FixedUpdate
fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn arrivals(app: &mut App) -> Vec<AgentArrived> {
    std::mem::take(&mut app.world_mut().resource_mut::<Arrivals>().0)
}

#[test]
fn test_bake_request_builds_routes() {
    let (mut app, _) = chain_app();
    assert!(app.world().resource::<Navigation>().needs_bake());

    app.world_mut().send_event(BakeRequest);
    app.world_mut().send_event(BakeRequest);
    run_ticks(&mut app, 3);

    let navigation = app.world().resource::<Navigation>();
    assert!(!navigation.needs_bake());
    assert_eq!(navigation.routes().len(), 6);
}

#[test]
fn test_move_request_drives_linked_entity() {
    let (mut app, ids) = chain_app();
    app.world_mut().send_event(BakeRequest);
    run_ticks(&mut app, 3);

    let agent = app
        .world_mut()
        .resource_mut::<Navigation>()
        .add_agent(Transform::default(), AgentOptions::default())
        .unwrap();
    let entity = app.world_mut().spawn((Transform::default(), NavAgentLink(agent))).id();

    app.world_mut().send_event(MoveAgentRequest {
        agent,
        target: Vec3::new(11.0, 0.0, 0.0),
    });
    run_ticks(&mut app, 60);

    let transform = app.world().get::<Transform>(entity).unwrap();
    assert!(transform.translation.distance(Vec3::new(10.0, 0.0, 0.0)) < 0.5);
    assert_eq!(
        app.world().resource::<Navigation>().home_node(agent),
        Some(ids[2])
    );

    let arrived = arrivals(&mut app);
    // Промежуточные waypoints: Moving → Queued, событие только на последнем
    assert_eq!(arrived.len(), 1);
    assert_eq!(arrived[0].agent, agent);
    assert!(arrived[0].position.distance(Vec3::new(10.0, 0.0, 0.0)) < 0.5);

    // Повторных AgentArrived без новой цели нет
    run_ticks(&mut app, 10);
    assert!(arrivals(&mut app).is_empty());
}

#[test]
fn test_rejected_move_request_does_not_panic() {
    let (mut app, _) = chain_app();
    app.world_mut().send_event(BakeRequest);
    run_ticks(&mut app, 3);

    app.world_mut().send_event(MoveAgentRequest {
        agent: AgentId(404),
        target: Vec3::ZERO,
    });
    run_ticks(&mut app, 3);

    assert_eq!(app.world().resource::<Navigation>().agent_count(), 0);
}

#[test]
fn test_headless_runs_are_deterministic() {
    fn run() -> Vec<Vec3> {
        let (mut app, _) = chain_app();
        app.world_mut().send_event(BakeRequest);
        run_ticks(&mut app, 3);

        let agents: Vec<AgentId> = {
            let mut navigation = app.world_mut().resource_mut::<Navigation>();
            (0..3)
                .map(|_| navigation.add_agent(Transform::default(), AgentOptions::default()).unwrap())
                .collect()
        };
        for (i, &agent) in agents.iter().enumerate() {
            app.world_mut().send_event(MoveAgentRequest {
                agent,
                target: Vec3::new(5.0 * i as f32, 0.0, 0.0),
            });
        }
        run_ticks(&mut app, 7);

        let navigation = app.world().resource::<Navigation>();
        agents
            .iter()
            .map(|&agent| navigation.agent_transform(agent).unwrap().translation)
            .collect()
    }

    assert_eq!(run(), run());
}
