use hedge_maze_core::{
    BodyKind, Command, EntityId, EntityKind, Event, Footprint, ScoreState, WorldPosition,
};
use hedge_maze_system_scoring::{Config, ScoreTracker};
use hedge_maze_world::{self as world, query, World};
use proptest::prelude::*;

fn spawned(entity: u32, kind: EntityKind) -> Event {
    Event::EntitySpawned {
        entity: EntityId::new(entity),
        kind,
        position: WorldPosition::new(entity as f32, 0.0),
    }
}

fn picked(entity: u32) -> Event {
    Event::CollectiblePicked {
        entity: EntityId::new(entity),
    }
}

fn published(commands: &[Command]) -> Vec<ScoreState> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::PublishScore { score } => Some(*score),
            _ => None,
        })
        .collect()
}

#[test]
fn win_is_reached_exactly_at_threshold() {
    let mut tracker = ScoreTracker::new(Config::new(3));
    let spawns: Vec<_> = (0..5).map(|id| spawned(id, EntityKind::Collectible)).collect();
    let mut commands = Vec::new();
    tracker.handle(&spawns, &mut commands);
    assert!(commands.is_empty(), "spawns alone do not change the score");

    let mut history = Vec::new();
    for id in 0..5 {
        tracker.handle(&[picked(id)], &mut commands);
        history.push(tracker.score());
    }

    let won: Vec<_> = history.iter().map(ScoreState::won).collect();
    assert_eq!(won, vec![false, false, true, true, true]);
    let scores: Vec<_> = history.iter().map(ScoreState::score).collect();
    assert_eq!(scores, vec![1, 2, 3, 4, 5]);
    assert_eq!(published(&commands), history, "every transition is published");
}

#[test]
fn duplicate_and_foreign_pickups_are_not_counted() {
    let mut tracker = ScoreTracker::new(Config::new(2));
    let mut commands = Vec::new();
    tracker.handle(
        &[
            spawned(0, EntityKind::Wall),
            spawned(1, EntityKind::Collectible),
            spawned(2, EntityKind::Goal),
        ],
        &mut commands,
    );

    tracker.handle(&[picked(1), picked(1), picked(0), picked(2), picked(9)], &mut commands);

    assert_eq!(tracker.score().score(), 1);
    assert!(!tracker.score().won());
    assert_eq!(published(&commands).len(), 1);
    assert_eq!(tracker.remaining(), 0);
}

#[test]
fn world_pickups_drive_the_scoreboard() {
    let mut world = World::new();
    let mut tracker = ScoreTracker::new(Config::new(2));
    let footprint = Footprint {
        body: BodyKind::Trigger,
        width: 1.0,
        height: 1.0,
        depth: 1.0,
        elevation: 0.5,
    };

    let mut events = Vec::new();
    for x in 0..2 {
        world::apply(
            &mut world,
            Command::SpawnEntity {
                kind: EntityKind::Collectible,
                position: WorldPosition::new(x as f32, 0.0),
                footprint,
            },
            &mut events,
        );
    }
    let mut commands = Vec::new();
    tracker.handle(&events, &mut commands);

    let collectibles: Vec<_> = query::entities(&world).iter().map(|entity| entity.id).collect();
    for entity in collectibles.iter().chain(collectibles.iter()) {
        let mut frame = Vec::new();
        world::apply(
            &mut world,
            Command::PickUpCollectible { entity: *entity },
            &mut frame,
        );
        tracker.handle(&frame, &mut commands);
    }

    let mut display = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut display);
    }

    let score = query::score(&world).expect("score was published");
    assert_eq!(score.score(), 2);
    assert!(score.won());
    assert_eq!(display.len(), 2, "one display update per counted pickup");
    assert_eq!(query::entity_count(&world, EntityKind::Collectible), 0);
}

proptest! {
    #[test]
    fn score_is_monotonic_and_won_is_sticky(
        threshold in 1u32..10,
        spawned_count in 0u32..20,
        pickups in prop::collection::vec(0u32..25, 0..60),
    ) {
        let mut tracker = ScoreTracker::new(Config::new(threshold));
        let spawns: Vec<_> = (0..spawned_count)
            .map(|id| spawned(id, EntityKind::Collectible))
            .collect();
        let mut commands = Vec::new();
        tracker.handle(&spawns, &mut commands);

        let mut previous = tracker.score();
        for id in pickups {
            tracker.handle(&[picked(id)], &mut commands);
            let current = tracker.score();
            prop_assert!(current.score() >= previous.score());
            prop_assert!(!previous.won() || current.won());
            prop_assert_eq!(current.won(), current.score() >= threshold);
            previous = current;
        }
        prop_assert!(previous.score() <= spawned_count);
    }
}
