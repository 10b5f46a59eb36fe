//! Runs a full presentation without a window: assets arrive from a loader
//! thread, narration plays on a virtual clock, and a scripted pointer spins
//! one entity once the row has settled.
//!
//! ```text
//! RUST_LOG=info cargo run --example headless_showreel [config.json]
//! ```

use futures::future::{BoxFuture, FutureExt};
use glam::Vec3;

use showreel::config::CameraPose;
use showreel::errors::Result;
use showreel::interaction::{InteractionState, PointerEvent};
use showreel::media::MediaClock;
use showreel::roster::{AssetLoader, AssetNode};
use showreel::scene::{BoundingBox, Camera};
use showreel::{EntityId, Presentation, PresentationConfig, RecordingRig, SyncOutcome, VirtualMedia};

const FRAME: f32 = 1.0 / 60.0;
const NARRATION_LENGTH: f32 = 17.0;

/// Hands out a body-plus-head figure for every path.
struct FigureLoader;

impl AssetLoader for FigureLoader {
    fn load(&self, path: &str) -> BoxFuture<'static, Result<AssetNode>> {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        async move {
            Ok(AssetNode::group(
                name,
                vec![
                    AssetNode::mesh("body", BoundingBox::from_size(Vec3::new(0.6, 1.0, 0.4))),
                    AssetNode::mesh("head", BoundingBox::from_size(Vec3::splat(0.35)))
                        .with_translation(Vec3::new(0.0, 0.7, 0.0)),
                ],
            ))
        }
        .boxed()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => PresentationConfig::from_path(path)?,
        None => PresentationConfig::default(),
    };

    let host_camera = CameraPose {
        position: Vec3::new(0.0, 2.0, 8.0),
        ..CameraPose::default()
    };
    let mut show = Presentation::new(
        config.clone(),
        VirtualMedia::new(NARRATION_LENGTH),
        RecordingRig::new(host_camera),
    )?;

    let loading = show.load_queue().load_all(&FigureLoader, &config.entities);
    let loader_thread = std::thread::spawn(move || pollster::block_on(loading));

    show.start()?;

    let mut frame = 0u32;
    let mut last_state = show.state();
    while show.state() != InteractionState::Interactive {
        show.media_mut().advance(FRAME);
        let outcome = show.tick(FRAME);
        frame += 1;

        if let SyncOutcome::Corrected { from, to } = outcome {
            println!("frame {frame:5}: drift corrected {from:.3}s -> {to:.3}s");
        }
        if let Some(id) = show.spotlight().active
            && frame % 60 == 0
        {
            println!(
                "frame {frame:5}: t = {:5.2}s, spotlight on {id}",
                show.media().current_time()
            );
        }
        if show.state() != last_state {
            println!("frame {frame:5}: {last_state:?} -> {:?}", show.state());
            last_state = show.state();
        }
    }

    if loader_thread.join().is_err() {
        anyhow::bail!("loader thread panicked");
    }

    let Some(target) = show.roster().iter().next().map(|e| e.id) else {
        println!("Nothing loaded; skipping pointer demo");
        return Ok(());
    };
    spin(&mut show, target)?;

    for entity in show.roster().iter() {
        println!(
            "{:>20}  at ({:5.2}, {:5.2}, {:5.2})  yaw {:5.2}",
            entity.display_name,
            entity.pose.position.x,
            entity.pose.position.y,
            entity.pose.position.z,
            entity.pose.rotation_y
        );
    }
    Ok(())
}

/// Hovers `id`, then drags right by 120 px over a dozen frames.
fn spin(show: &mut Presentation<VirtualMedia, RecordingRig>, id: EntityId) -> anyhow::Result<()> {
    let Some(position) = show.roster().get(id).map(|e| e.pose.position) else {
        anyhow::bail!("entity {id} vanished");
    };
    let width = 1280.0;
    let height = 720.0;
    show.resize(width, height);

    let camera = Camera::from_pose(&show.rig().pose, width / height);
    let ndc = camera.view_projection_matrix().project_point3(position);
    let x = (ndc.x + 1.0) / 2.0 * width;
    let y = (1.0 - ndc.y) / 2.0 * height;

    show.pointer_event(PointerEvent::Moved { x, y });
    show.tick(FRAME);
    println!("hovering {:?}, cursor {:?}", show.pointer().hovered, show.cursor_icon());

    show.pointer_event(PointerEvent::Pressed { x, y });
    for step in 1..=12 {
        show.pointer_event(PointerEvent::Moved { x: x + step as f32 * 10.0, y });
        show.tick(FRAME);
    }
    show.pointer_event(PointerEvent::Released);
    show.tick(FRAME);
    Ok(())
}
