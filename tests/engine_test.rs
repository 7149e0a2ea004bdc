//! End-to-end engine behavior over a simulated pointer

use std::sync::Arc;
use std::thread;

use pointer_humanizer::backend::{
    FixedSelector, PointerCall, SimulatedChannel, SimulatedPointer,
};
use pointer_humanizer::motion::HISTORY_CAPACITY;
use pointer_humanizer::{
    BackendKind, Engine, EngineState, MovementStyle, PointerPlatform, Position, Settings,
};

const START: Position = Position::new(200, 200);

/// No humanization and no delays: every queued step is a raw placement
fn direct_settings() -> Settings {
    Settings {
        movement_delay_micros: 0,
        ..Settings::direct()
    }
}

fn humanized_settings() -> Settings {
    Settings {
        movement_delay_micros: 0,
        ..Settings::default()
    }
}

fn start_engine(settings: Settings) -> (Arc<SimulatedPointer>, Engine) {
    let pointer = Arc::new(SimulatedPointer::new(START));
    let engine = Engine::new(pointer.clone())
        .with_settings(settings)
        .with_seed(2024);
    assert!(engine.initialize());
    (pointer, engine)
}

#[test]
fn test_uninitialized_engine_rejects_moves() {
    let pointer = Arc::new(SimulatedPointer::new(START));
    let engine = Engine::new(pointer.clone());

    assert!(!engine.move_cursor(3, 3));
    assert_eq!(engine.pending_movements(), 0);
    assert!(pointer.calls().is_empty());
}

#[test]
fn test_move_cursor_queues_unit_steps() {
    let (pointer, engine) = start_engine(direct_settings());

    for _ in 0..4 {
        assert!(engine.move_cursor(37, -50));
    }
    assert!(engine.move_cursor(0, 9));
    engine.shutdown();

    let calls = pointer.calls();
    assert_eq!(calls.len(), 5);

    let mut previous = START;
    for call in calls {
        let PointerCall::Absolute(target) = call else {
            panic!("Expected raw placement, got {:?}", call);
        };
        assert!((target.x - previous.x).abs() <= 1);
        assert!((target.y - previous.y).abs() <= 1);
        previous = target;
    }
    assert_eq!(pointer.current_position(), Position::new(204, 197));
}

#[test]
fn test_move_to_far_target_queues_double_step() {
    let settings = Settings {
        movement_style: MovementStyle::Direct,
        ..direct_settings()
    };
    let (pointer, engine) = start_engine(settings);

    assert!(engine.move_cursor_to(900, 20));
    engine.shutdown();

    assert_eq!(
        pointer.calls(),
        vec![PointerCall::Absolute(Position::new(202, 198))]
    );
    assert_eq!(engine.history(), vec![Position::new(202, 198)]);
}

#[test]
fn test_move_to_nearby_target_takes_small_path() {
    let (pointer, engine) = start_engine(humanized_settings());

    assert!(engine.move_cursor_to(START.x + 3, START.y + 3));
    engine.shutdown();

    // One humanized step, never a sampled curve
    assert_eq!(pointer.calls().len(), 1);
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn test_move_to_far_target_walks_curve() {
    let (pointer, engine) = start_engine(humanized_settings());
    let target = Position::new(700, 480);

    assert!(engine.move_cursor_to(target.x, target.y));

    let calls = pointer.calls();
    // Level 5 samples 35 segments, plus the final correction
    assert_eq!(calls.len(), 36);
    assert_eq!(calls.last(), Some(&PointerCall::Absolute(target)));
    assert_eq!(engine.get_position(), target);
    assert_eq!(engine.history().last(), Some(&target));
    assert_eq!(engine.pending_movements(), 0);
}

#[test]
fn test_random_style_mixes_curves_and_steps() {
    let settings = Settings {
        movement_style: MovementStyle::Random,
        ..humanized_settings()
    };
    let (_pointer, engine) = start_engine(settings);

    let mut curved = 0;
    let mut stepped = 0;
    for i in 0..20 {
        let target = if i % 2 == 0 {
            Position::new(900, 700)
        } else {
            Position::new(40, 40)
        };
        assert!(engine.move_cursor_to(target.x, target.y));
        // A walked curve records its target, a queued step records one step
        if engine.history().last() == Some(&target) {
            curved += 1;
        } else {
            stepped += 1;
        }
    }
    engine.shutdown();

    assert!(curved > 0);
    assert!(stepped > 0);
}

#[test]
fn test_shutdown_drains_queue() {
    let settings = Settings {
        movement_delay_micros: 300,
        ..Settings::direct()
    };
    let (pointer, engine) = start_engine(settings);

    for _ in 0..40 {
        assert!(engine.move_right(5));
    }
    engine.shutdown();

    assert_eq!(engine.state(), EngineState::Stopped);
    assert_eq!(engine.pending_movements(), 0);
    assert_eq!(pointer.calls().len(), 40);
    assert_eq!(pointer.current_position(), Position::new(240, 200));
}

#[test]
fn test_disabled_engine_discards_queued_moves() {
    let (pointer, engine) = start_engine(direct_settings());
    engine.set_enabled(false);

    for _ in 0..10 {
        assert!(engine.move_down(5));
    }
    engine.shutdown();

    assert!(pointer.calls().is_empty());
    assert_eq!(pointer.current_position(), START);
    // Producers still record where they believed the pointer would go
    assert_eq!(engine.history().len(), 10);
}

#[test]
fn test_disabled_engine_never_walks_curve() {
    let (pointer, engine) = start_engine(humanized_settings());
    engine.set_enabled(false);

    assert!(engine.move_cursor_to(500, 500));
    engine.shutdown();

    assert!(pointer.calls().is_empty());
    assert_eq!(pointer.current_position(), START);
    // Only the discarded double step is recorded, not the far target
    assert_eq!(engine.history(), vec![Position::new(202, 202)]);
}

#[test]
fn test_move_to_starts_from_real_position() {
    let settings = Settings {
        movement_style: MovementStyle::Direct,
        ..direct_settings()
    };
    let (pointer, engine) = start_engine(settings);

    // The user moves the pointer between two engine calls
    pointer.warp(Position::new(600, 600));
    pointer.clear_calls();
    assert!(engine.move_cursor_to(0, 600));
    engine.shutdown();

    assert_eq!(
        pointer.calls(),
        vec![PointerCall::Absolute(Position::new(598, 600))]
    );
    assert_eq!(engine.history(), vec![Position::new(598, 600)]);
}

#[test]
fn test_history_is_bounded() {
    let (_pointer, engine) = start_engine(direct_settings());

    for _ in 0..25 {
        engine.move_left(5);
    }
    engine.shutdown();

    assert_eq!(engine.history().len(), HISTORY_CAPACITY);
}

#[test]
fn test_concurrent_callers_lose_nothing() {
    let (pointer, engine) = start_engine(direct_settings());
    let engine = Arc::new(engine);

    let callers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..50 {
                    assert!(engine.move_cursor(1, 0));
                }
            })
        })
        .collect();

    for caller in callers {
        caller.join().unwrap();
    }
    engine.shutdown();

    assert_eq!(pointer.calls().len(), 200);
    assert_eq!(pointer.current_position(), Position::new(400, 200));
}

#[test]
fn test_failing_backend_does_not_stall_worker() {
    let (pointer, engine) = start_engine(direct_settings());
    pointer.set_failing(true);

    for _ in 0..5 {
        assert!(engine.move_cursor(1, 1));
    }
    engine.shutdown();

    assert_eq!(engine.state(), EngineState::Stopped);
    assert!(pointer.calls().is_empty());
}

#[test]
fn test_unreachable_channel_is_never_selected() {
    let pointer = Arc::new(SimulatedPointer::new(START));
    let channel = Arc::new(SimulatedChannel::new(pointer.clone(), false));
    let engine = Engine::new(pointer.clone())
        .with_settings(Settings {
            humanization_level: 10,
            ..humanized_settings()
        })
        .with_channel(channel)
        .with_seed(5);

    assert!(engine.initialize());
    assert!(!engine.channel_available());

    for _ in 0..200 {
        engine.move_cursor(1, -1);
    }
    engine.shutdown();

    let calls = pointer.calls();
    assert_eq!(calls.len(), 200);
    assert!(calls
        .iter()
        .all(|call| !matches!(call, PointerCall::Privileged(_))));
}

#[test]
fn test_reachable_channel_carries_moves() {
    let pointer = Arc::new(SimulatedPointer::new(START));
    let channel = Arc::new(SimulatedChannel::new(pointer.clone(), true));
    let engine = Engine::new(pointer.clone())
        .with_settings(humanized_settings())
        .with_channel(channel)
        .with_selector(Box::new(FixedSelector(BackendKind::PrivilegedChannel)))
        .with_seed(6);

    assert!(engine.initialize());
    assert!(engine.channel_available());

    for _ in 0..5 {
        engine.move_cursor(2, 0);
    }
    engine.shutdown();

    let calls = pointer.calls();
    assert_eq!(calls.len(), 5);
    assert!(calls
        .iter()
        .all(|call| matches!(call, PointerCall::Privileged(_))));
}
