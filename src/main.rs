//! Glide CLI - desktop demo of the movement engine
//!
//! Drives an engine over a simulated pointer so the queue, the worker and
//! curved paths can be watched without touching a real display.

use std::sync::Arc;

use pointer_humanizer::backend::{PointerCall, SimulatedPointer};
use pointer_humanizer::{Direction, Engine, Position, Settings};

fn main() {
    println!("Glide - Humanized Pointer Movement");
    println!("==================================");
    println!();

    let settings = Settings::default();
    let pointer = Arc::new(SimulatedPointer::new(Position::new(960, 540)));
    let engine = Engine::new(pointer.clone()).with_settings(settings);

    if !engine.initialize() {
        eprintln!("Failed to start the movement engine");
        std::process::exit(1);
    }

    println!("Current Configuration:");
    println!("  - Humanization Level: {}", engine.humanization_level());
    println!("  - Jitter Amount: {}px", engine.jitter_amount());
    println!("  - Movement Delay: {}us", engine.movement_delay());
    println!("  - Path Deviation: {:.2}", engine.path_deviation());
    println!("  - Movement Style: {:?}", engine.movement_style());
    println!("  - Privileged Channel: {}", engine.channel_available());
    println!();

    // A few nudges go through the queue
    for direction in [Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
        engine.nudge(direction);
    }

    // A long absolute move walks a curve on this thread
    engine.move_cursor_to(1400, 300);

    engine.shutdown();

    let calls = pointer.calls();
    println!("Pointer calls: {}", calls.len());
    for call in calls.iter().take(8) {
        match call {
            PointerCall::Relative(delta) => println!("  relative ({}, {})", delta.dx, delta.dy),
            PointerCall::Absolute(target) => println!("  absolute ({}, {})", target.x, target.y),
            PointerCall::Privileged(target) => {
                println!("  privileged ({}, {})", target.x, target.y)
            }
        }
    }
    if calls.len() > 8 {
        println!("  ... {} more", calls.len() - 8);
    }
    println!();

    println!("History: {:?}", engine.history());
    let position = engine.get_position();
    println!("Final Position: ({}, {})", position.x, position.y);
}
