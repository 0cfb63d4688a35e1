use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::actuator::Actuator;
use crate::components::container::{Container, world_position};
use crate::components::grabbable::{EntityKind, Grabbable};
use crate::components::highlight::Highlighted;
use crate::components::hitsphere::HitSphere;
use crate::components::monster::MonsterKind;
use crate::components::transform3d::Transform3D;
use crate::events::effects::TrailColor;
use crate::resources::camera::DesktopCamera;
use crate::resources::effectsview::EffectsView;
use crate::resources::interaction::GrabLines;
use crate::resources::island::IslandFrame;
use crate::systems::flight::{ISLAND_RADIUS, VILLAGE_RADIUS};

const RIM_SEGMENTS: usize = 48;
const TRUNK_HEIGHT: f32 = 1.2;

/// One visible object, already resolved to world space.
struct Drawable {
    kind: EntityKind,
    position: Vector3,
    scale: f32,
    highlighted: bool,
}

fn collect_drawables(world: &mut World, island: &IslandFrame) -> Vec<Drawable> {
    let mut q = world.query::<(&Grabbable, &Container, &Transform3D, Has<Highlighted>)>();
    q.iter(world)
        .filter(|(_, c, _, _)| c.is_visible())
        .map(|(g, c, t, highlighted)| Drawable {
            kind: g.kind,
            position: world_position(c, t, island),
            scale: t.max_scale(),
            highlighted,
        })
        .collect()
}

fn draw_island<D: RaylibDraw3D>(d: &mut D, island: &IslandFrame, flash: f32) {
    let rim = |i: usize| {
        let a = i as f32 / RIM_SEGMENTS as f32 * std::f32::consts::TAU;
        island.to_world(Vector3::new(a.cos() * ISLAND_RADIUS, 0.0, a.sin() * ISLAND_RADIUS))
    };
    let center = island.to_world(Vector3::zero());
    for i in 0..RIM_SEGMENTS {
        d.draw_line_3D(rim(i), rim(i + 1), Color::DARKGREEN);
        if i % 6 == 0 {
            d.draw_line_3D(center, rim(i), Color::GREEN);
        }
    }
    let village = if flash > 0.0 { Color::RED } else { Color::BEIGE };
    d.draw_cylinder(center, VILLAGE_RADIUS * 0.8, VILLAGE_RADIUS, 1.5, 12, village);
}

fn draw_object<D: RaylibDraw3D>(d: &mut D, obj: &Drawable) {
    let s = obj.scale;
    match obj.kind {
        EntityKind::Tree => {
            d.draw_cylinder(obj.position, 0.25 * s, 0.35 * s, TRUNK_HEIGHT * s, 8, Color::BROWN);
            let crown = obj.position + Vector3::new(0.0, TRUNK_HEIGHT * s, 0.0);
            d.draw_sphere(crown, 0.9 * s, Color::DARKGREEN);
        }
        EntityKind::Rock => d.draw_sphere(obj.position, 0.6 * s, Color::GRAY),
        EntityKind::Monster(kind) => {
            let color = match kind {
                MonsterKind::Basic => Color::PURPLE,
                MonsterKind::Strong => Color::MAROON,
            };
            d.draw_sphere(obj.position, kind.body_radius() * s, color);
        }
    }
    if obj.highlighted {
        let r = match obj.kind {
            EntityKind::Monster(kind) => kind.body_radius(),
            _ => 1.0,
        } * s;
        d.draw_sphere_wires(obj.position, r * 1.2, 8, 8, Color::YELLOW);
    }
}

fn draw_effects<D: RaylibDraw3D>(d: &mut D, view: &EffectsView) {
    for trail in view.trails.values() {
        let color = match trail.color {
            TrailColor::Red => Color::RED,
            TrailColor::Orange => Color::ORANGE,
        };
        for (a, b) in trail.points.iter().zip(trail.points.iter().skip(1)) {
            d.draw_line_3D(*a, *b, color);
        }
    }
    for p in view.particles.iter() {
        let color = Color::new(130, 90, 50, (p.alpha() * 255.0) as u8);
        d.draw_cube(p.position, 0.12, 0.12, 0.12, color);
    }
}

/// Scoreboard and village health bar.
fn draw_hud(d: &mut RaylibDrawHandle, view: &EffectsView) {
    let board = &view.scoreboard;
    d.draw_text(&format!("Wave: {}", board.wave), 20, 20, 24, Color::WHITE);
    d.draw_text(
        &format!("Monsters: {}", board.monsters_remaining),
        20,
        50,
        24,
        Color::WHITE,
    );
    d.draw_text(&format!("Score: {}", board.score), 20, 80, 24, Color::WHITE);
    if let Some(message) = &board.message {
        let w = d.get_screen_width();
        let size = 40;
        let x = (w - message.len() as i32 * size / 2) / 2;
        d.draw_text(message, x, 160, size, Color::GOLD);
    }

    let fraction = if board.village_max_hp == 0 {
        0.0
    } else {
        board.village_hp as f32 / board.village_max_hp as f32
    };
    let bar_color = if view.flash > 0.0 {
        Color::WHITE
    } else if fraction > 0.5 {
        Color::GREEN
    } else if fraction > 0.25 {
        Color::YELLOW
    } else {
        Color::RED
    };
    let (x, y, w, h) = (20, 115, 200, 16);
    d.draw_rectangle(x, y, w, h, Color::DARKGRAY);
    d.draw_rectangle(x, y, (w as f32 * fraction) as i32, h, bar_color);
    d.draw_text(
        &format!("Village {}/{}", board.village_hp, board.village_max_hp),
        x + w + 10,
        y,
        16,
        Color::WHITE,
    );
}

/// Draw one frame: island, objects, grab lines and effects in 3D, then the
/// HUD on top.
pub fn render_frame(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    world: &mut World,
    view: &EffectsView,
) {
    let island = *world.resource::<IslandFrame>();
    let cam = *world.resource::<DesktopCamera>();
    let lines = *world.resource::<GrabLines>();
    let drawables = collect_drawables(world, &island);
    let mouse_hand = {
        let mut q = world.query::<&Actuator>();
        q.iter(world)
            .find(|a| !a.id.is_controller() && a.grabbed.is_some())
            .map(|a| a.position)
    };
    let debug_spheres: Vec<(Vector3, f32)> = if log::log_enabled!(log::Level::Trace) {
        let mut q = world.query::<(&HitSphere, &ChildOf)>();
        let mut owners = world.query::<(&Container, &Transform3D)>();
        q.iter(world)
            .filter_map(|(s, parent)| {
                let (c, t) = owners.get(world, parent.parent()).ok()?;
                let scale = t.max_scale();
                let mut shifted = *t;
                shifted.position = t.position + s.offset * scale;
                Some((world_position(c, &shifted, &island), s.radius * scale))
            })
            .collect()
    } else {
        Vec::new()
    };

    let camera = Camera3D::perspective(cam.position, cam.target, cam.up, cam.fovy);
    let mut d = rl.begin_drawing(thread);
    d.clear_background(Color::SKYBLUE);
    {
        let mut d3 = d.begin_mode3D(camera);
        draw_island(&mut d3, &island, view.flash);
        for obj in drawables.iter() {
            draw_object(&mut d3, obj);
        }
        for line in [lines.left, lines.right] {
            if line.visible {
                d3.draw_line_3D(line.start, line.end, Color::WHITE);
            }
        }
        if let Some(hand) = mouse_hand {
            d3.draw_sphere_wires(hand, 0.1, 6, 6, Color::WHITE);
        }
        for (center, radius) in debug_spheres {
            d3.draw_sphere_wires(center, radius, 8, 8, Color::LIME);
        }
        draw_effects(&mut d3, view);
    }
    draw_hud(&mut d, view);
}
