//! Sandbox Demo - Scripted Click-to-Build Session
//!
//! Headless run of the place/remove loop against an in-memory scene. A
//! scripted camera hovers over a few cells, clicks, and switches modes the
//! way a player would with the mouse and the E/R keys.
//!
//! Run with: `cargo run --bin sandbox_demo [config.json] [blocks.json]`
//!
//! Set `RUST_LOG=debug` to see cursor and preview updates.

use std::error::Error;
use std::process::ExitCode;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use tracing_subscriber::EnvFilter;

use sandbox_grid_engine::camera::PerspectiveCamera;
use sandbox_grid_engine::game::{BlockRegistry, SandboxConfig, SandboxDemo, SandboxSystem};
use sandbox_grid_engine::input::{InputSnapshot, KeyCode};
use sandbox_grid_engine::render::{RenderTemplate, SceneRenderables, instance_bytes};

/// Built-in registry used when no blocks file is given.
const DEFAULT_BLOCKS: &str = r#"{
    "blocks": [
        { "name": "grass", "template": 1 },
        { "name": "stone", "template": 2 },
        { "name": "bedrock", "template": 3, "destructible": false }
    ]
}"#;

/// Template shown over the cursor cell in remove mode.
const REMOVE_PREVIEW: RenderTemplate = RenderTemplate(100);

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const CAMERA_HEIGHT: f32 = 12.0;

/// One scripted tick: where the camera hovers and what the player presses.
struct ScriptStep {
    hover: Vec3,
    click: bool,
    key: Option<KeyCode>,
}

impl ScriptStep {
    fn click(x: f32, z: f32) -> Self {
        Self {
            hover: Vec3::new(x, 0.0, z),
            click: true,
            key: None,
        }
    }

    fn key(x: f32, z: f32, key: KeyCode) -> Self {
        Self {
            hover: Vec3::new(x, 0.0, z),
            click: false,
            key: Some(key),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SandboxConfig::load(path)?,
        None => SandboxConfig::default(),
    };
    let registry = match args.next() {
        Some(path) => BlockRegistry::load(path)?,
        None => BlockRegistry::from_json_str(DEFAULT_BLOCKS)?,
    };

    let grass = registry.get("grass").ok_or("registry has no 'grass' block")?;
    let bedrock = registry.get("bedrock");

    let mut scene = SceneRenderables::new();
    {
        let mut system = SandboxSystem::from_config(&mut scene, &config)?;
        let mut demo = SandboxDemo::new(
            &mut system,
            Rc::clone(&grass),
            REMOVE_PREVIEW,
            config.bindings.clone(),
        );

        if config.debug.show_grid_lines {
            tracing::info!(
                lines = system.grid_lines().len(),
                x_min = system.x_min(),
                z_min = system.z_min(),
                y_level = system.y_level(),
                "grid ready"
            );
        }

        let ground = config.ground.unwrap_or(config.anchor);
        let (place, remove) = (config.bindings.place_mode, config.bindings.remove_mode);
        let script = [
            ScriptStep::click(ground.x + 0.5, ground.z + 0.5),
            ScriptStep::click(ground.x + 1.5, ground.z + 0.5),
            // Same cell again: replaces the grass placed there
            ScriptStep::click(ground.x + 1.5, ground.z + 0.5),
            // Far off the grid: refused
            ScriptStep::click(ground.x + 500.0, ground.z),
            ScriptStep::key(ground.x + 0.5, ground.z + 0.5, remove),
            ScriptStep::click(ground.x + 0.5, ground.z + 0.5),
            ScriptStep::key(ground.x - 0.5, ground.z - 0.5, place),
        ];

        let mut uploads = 0usize;
        let mut uploaded_bytes = 0usize;
        for step in &script {
            let camera = PerspectiveCamera::new(
                step.hover + Vec3::Y * (ground.y + CAMERA_HEIGHT),
                Vec3::NEG_Y,
                60f32.to_radians(),
                VIEWPORT,
            );
            let mut input = InputSnapshot::at(VIEWPORT * 0.5);
            input.primary_action = step.click;
            input.keys_pressed.extend(step.key);

            let report = demo.step(&mut system, &camera, &input);
            if config.debug.highlight_cursor_cell {
                if let Some((center, _)) = system.cursor_highlight() {
                    tracing::debug!(?center, "cursor cell");
                }
            }
            if let Some(action) = &report.action {
                tracing::debug!(?action, mode = demo.mode_label(), "tick");
            }
            if let Some(instances) = system.take_dirty_instances() {
                uploads += 1;
                uploaded_bytes = instance_bytes(&instances).len();
                tracing::debug!(
                    instances = instances.len(),
                    bytes = uploaded_bytes,
                    "instance buffer changed"
                );
            }
        }

        // Permanent blocks survive both replacement and removal
        if let (Some(bedrock), Some(cell)) = (bedrock, system.cursor_index()) {
            system.set_block(&bedrock, cell)?;
            if let Err(err) = system.remove_block(cell) {
                tracing::info!(%err, "bedrock stays");
            }
        }

        println!("===========================================");
        println!("   Sandbox Grid - Demo Summary");
        println!("===========================================");
        println!("  {}", demo.mode_label());
        for (index, renderable) in system.all_blocks() {
            println!("  block {renderable} at {index}");
        }
        println!("  live renderables: {}", system.renderer().len());
        println!("  instance uploads: {uploads} (last {uploaded_bytes} bytes)");
    }

    println!("  after teardown: {} live", scene.len());
    Ok(())
}
