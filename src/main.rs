use anyhow::Result;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use engine::input::InputManager;
use engine::physics::body::presets;
use engine::physics::{BodyTag, PhysicsWorld};
use game::characters::{Character, BASE_STATS};

/// Build the demo level: a wide floor plus one wall brush the player can
/// bump into but never stand on
fn build_level(physics: &mut PhysicsWorld) {
    let floor = physics.add_rigid_body(presets::terrain_body(0.0, -1.125));
    physics.add_collider(presets::terrain_collider(60.0, 0.5), floor);

    let wall = physics.add_rigid_body(presets::terrain_body(8.0, 1.0));
    physics.add_collider(presets::terrain_collider(0.5, 4.0), wall);
    physics.tag_body(wall, BodyTag::Wall);
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Springstep...");

    let mut physics = PhysicsWorld::new();
    build_level(&mut physics);

    let mut character = Character::spawn(&mut physics, BASE_STATS, 0.0, 0.0)
        .map_err(|e| anyhow::anyhow!("failed to spawn player: {e}"))?;

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Springstep")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { button, state, .. },
                ..
            } => {
                input.process_mouse_event(button, state);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Drop held keys so the player doesn't keep walking while
                // the window is in the background
                input.reset();
            }
            Event::AboutToWait => {
                let updates = game_loop.begin_frame();
                for _ in 0..updates {
                    physics.step();
                    let frame = input.frame();
                    character.update(&mut physics, &frame, FIXED_TIMESTEP);
                }

                if updates > 0 && game_loop.update_count() % 60 == 0 {
                    let transform = character.render_transform();
                    info!(
                        "tick {}: pos ({:.2}, {:.2}), frame {}, airborne {}",
                        game_loop.update_count(),
                        transform.position.x,
                        transform.position.y,
                        character.current_frame(),
                        character.controller.airborne(),
                    );
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
