//! Animated visualization of roll removal using kiss3d.
//!
//! A pure consumer of the eroder's round sequence: frames are computed up
//! front by stepping an [`Eroder`], then paged through with the keyboard.
//! All pacing lives here; the core never blocks on input.

use kiss3d::prelude::*;
use rustc_hash::FxHashSet;

use rollout::{Eroder, Grid, Pos};

/// Rendered tile size, slightly under the cell spacing for visible gaps.
const TILE_SIZE: f32 = 0.9;

/// One display frame: a grid snapshot plus the rolls to highlight.
pub struct Frame {
    grid: Grid,
    /// Rolls about to be removed, drawn in red.
    highlight: FxHashSet<Pos>,
    caption: String,
}

/// Computes the full frame sequence for a simulation run.
///
/// Schedule per round: one frame highlighting the accessible rolls on the
/// pre-removal grid, one frame showing the grid after removal. The initial
/// state is frame 0.
pub fn compute_frames(grid: Grid) -> Vec<Frame> {
    let mut frames = vec![Frame {
        grid: grid.clone(),
        highlight: FxHashSet::default(),
        caption: format!("Initial: {} rolls", grid.roll_count()),
    }];

    let mut eroder = Eroder::new(grid);
    loop {
        let before = eroder.grid().clone();
        let Some(round) = eroder.step() else { break };

        frames.push(Frame {
            grid: before,
            highlight: round.removed.iter().copied().collect(),
            caption: format!("Round {}: {} accessible", round.index, round.removed.len()),
        });
        frames.push(Frame {
            grid: eroder.grid().clone(),
            highlight: FxHashSet::default(),
            caption: format!(
                "Round {}: removed {}, {} remaining",
                round.index,
                round.removed.len(),
                round.remaining
            ),
        });
    }

    frames
}

/// Returns the display color for a tile.
fn tile_color(highlighted: bool) -> Color {
    if highlighted {
        Color::new(1.0, 0.2, 0.4, 1.0) // red: accessible, about to go
    } else {
        Color::new(0.0, 0.8, 0.4, 1.0) // green: still racked
    }
}

/// Builds the scene for one frame, returning the tile nodes.
///
/// Grid rows grow downward, so row r maps to -r on the Y axis; the grid is
/// centered on the origin.
fn build_scene(scene: &mut SceneNode3d, frame: &Frame) -> Vec<SceneNode3d> {
    let x_offset = frame.grid.cols() as f32 / 2.0 - 0.5;
    let y_offset = frame.grid.rows() as f32 / 2.0 - 0.5;

    let mut tiles = Vec::new();
    for row in 0..frame.grid.rows() {
        for col in 0..frame.grid.cols() {
            if !frame.grid.is_roll((row, col)) {
                continue;
            }
            let position = Vec3::new(col as f32 - x_offset, y_offset - row as f32, 0.0);
            let node = scene
                .add_cube(TILE_SIZE, TILE_SIZE, TILE_SIZE * 0.3)
                .set_color(tile_color(frame.highlight.contains(&(row, col))))
                .set_position(position);
            tiles.push(node);
        }
    }

    tiles
}

/// Pages through the frames in an interactive window.
pub fn display(frames: Vec<Frame>) {
    pollster::block_on(display_async(frames));
}

async fn display_async(frames: Vec<Frame>) {
    let Some(first) = frames.first() else {
        println!("No frames to display");
        return;
    };

    let num_frames = frames.len();
    let mut current_frame = 0;

    let mut window = Window::new(&format!(
        "{} (1/{}) - [Left/Right] step, [R] restart",
        first.caption, num_frames
    ))
    .await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(first.grid.rows().max(first.grid.cols()) as f32 * 1.6);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(200.0))
        .set_position(Vec3::new(0.0, 0.0, 10.0));

    let mut tiles = build_scene(&mut scene, &frames[current_frame]);
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Right => {
                            if current_frame + 1 < num_frames {
                                current_frame += 1;
                                needs_rebuild = true;
                            }
                        }
                        Key::Left => {
                            if current_frame > 0 {
                                current_frame -= 1;
                                needs_rebuild = true;
                            }
                        }
                        Key::R => {
                            current_frame = 0;
                            needs_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if needs_rebuild {
            for mut tile in tiles.drain(..) {
                tile.remove();
            }
            tiles = build_scene(&mut scene, &frames[current_frame]);
            window.set_title(&format!(
                "{} ({}/{}) - [Left/Right] step, [R] restart",
                frames[current_frame].caption,
                current_frame + 1,
                num_frames
            ));
            needs_rebuild = false;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
