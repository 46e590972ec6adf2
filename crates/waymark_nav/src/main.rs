//! Headless навигация Waymark
//!
//! Раскидывает anchors сеткой с jitter, делает bake и гоняет агентов
//! между случайными точками.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use waymark_nav::{
    create_headless_app, AgentArrived, AgentOptions, Anchor, BakeRequest, MoveAgentRequest, NavAgentLink,
    Navigation, NavigationConfig,
};

const GRID: i32 = 4;
const SPACING: f32 = 5.0;
const AGENT_COUNT: usize = 3;
const TICK_COUNT: usize = 1000;

fn random_target(rng: &mut ChaCha8Rng) -> Vec3 {
    let extent = (GRID - 1) as f32 * SPACING;
    Vec3::new(rng.gen_range(0.0..extent), 0.0, rng.gen_range(0.0..extent))
}

fn main() {
    let seed = 42;
    let config = match std::env::args().nth(1) {
        Some(path) => match NavigationConfig::from_file(&path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Failed to load {}: {}", path, error);
                std::process::exit(1);
            }
        },
        None => {
            let mut config = NavigationConfig::default();
            config.graph.connect_distance = SPACING + 0.5; // только соседи по сетке
            config.graph.max_route_nodes = Some(8);
            config.agent.speed = 0.25;
            config
        }
    };

    println!("Starting Waymark headless navigation (seed: {})", seed);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut app = create_headless_app(config);

    // Anchors: сетка GRID x GRID с небольшим jitter
    {
        let mut navigation = app.world_mut().resource_mut::<Navigation>();
        for x in 0..GRID {
            for z in 0..GRID {
                let jitter = Vec3::new(rng.gen_range(-0.3..0.3), 0.0, rng.gen_range(-0.3..0.3));
                let position = Vec3::new(x as f32 * SPACING, 0.0, z as f32 * SPACING) + jitter;
                navigation.add_node(Anchor::new(position, Vec3::splat(0.25)));
            }
        }
    }
    // Первый update только запускает часы (нулевой delta, FixedUpdate не тикает)
    app.world_mut().send_event(BakeRequest);
    app.update();
    app.update();

    // Агенты на случайных нодах
    let mut agents = Vec::new();
    for _ in 0..AGENT_COUNT {
        let added = {
            let mut navigation = app.world_mut().resource_mut::<Navigation>();
            let index = rng.gen_range(0..navigation.nodes().len());
            let start = navigation.nodes()[index].id();
            navigation.add_agent(Transform::default(), AgentOptions::default().starting_at(start))
        };

        let agent = match added {
            Ok(agent) => agent,
            Err(error) => {
                eprintln!("Failed to add agent: {}", error);
                std::process::exit(1);
            }
        };
        app.world_mut().spawn((Transform::default(), NavAgentLink(agent)));
        agents.push(agent);
    }

    for &agent in &agents {
        let target = random_target(&mut rng);
        app.world_mut().send_event(MoveAgentRequest { agent, target });
    }

    let mut arrivals = 0;
    for tick in 0..TICK_COUNT {
        app.update();

        // Дошедшие агенты получают новую цель
        let arrived: Vec<AgentArrived> = app
            .world_mut()
            .resource_mut::<Events<AgentArrived>>()
            .drain()
            .collect();
        for event in arrived {
            arrivals += 1;
            println!("Tick {}: {} arrived at {:.2}", tick, event.agent, event.position);
            let target = random_target(&mut rng);
            app.world_mut().send_event(MoveAgentRequest { agent: event.agent, target });
        }

        if tick % 200 == 0 {
            let mut query = app.world_mut().query::<(&NavAgentLink, &Transform)>();
            for (link, transform) in query.iter(app.world()) {
                println!("Tick {}: {} at {:.2}", tick, link.0, transform.translation);
            }
        }
    }

    println!("Navigation complete! {} arrivals in {} ticks", arrivals, TICK_COUNT);
}
