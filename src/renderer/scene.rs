//! Render step
//!
//! Projects a `GameState` onto a [`Surface`]. Drawing reads the state only;
//! cosmetic animation (laser hue, flame flicker) is derived from the session
//! clock so the same state always yields the same frame.

use glam::Vec2;

use super::shapes;
use super::surface::{ColorStop, DrawCommand, Glow, Paint, Surface};
use crate::color::{Color, palette};
use crate::settings::Settings;
use crate::sim::collision::Rect;
use crate::sim::state::{BonusItem, BonusKind, Bullet, BulletKind, Enemy, EnemyKind, GameState};

const BULLET_GLOW: f32 = 10.0;
const INVADER_GLOW: f32 = 5.0;
const SPARK_GLOW: f32 = 5.0;
const OUTLINE_WIDTH: f32 = 2.0;
const COCKPIT_RADIUS: f32 = 5.0;
const BONUS_GLYPH_FONT: &str = "bold 12px Orbitron";

/// Per-frame rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw missile smoke trails
    pub trails: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { trails: true }
    }
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            trails: settings.trails,
        }
    }
}

/// Draw one complete frame
pub fn render(state: &GameState, options: &RenderOptions, surface: &mut dyn Surface) {
    surface.draw(&DrawCommand::Clear(palette::BACKGROUND));

    for star in &state.stars {
        surface.draw(&DrawCommand::FillRect {
            rect: Rect::new(star.pos.x, star.pos.y, star.size, star.size),
            paint: palette::STAR.with_alpha(star.size / 3.0).into(),
            glow: None,
        });
    }

    let laser = laser_color(state.clock_ms);
    for bullet in &state.bullets {
        draw_bullet(surface, bullet, laser, options.trails);
    }
    for enemy in &state.enemies {
        draw_enemy(surface, enemy);
    }
    for item in &state.bonus_items {
        draw_bonus_item(surface, item);
    }

    for spark in &state.particles {
        let scale = spark.fade();
        let radius = spark.radius * scale;
        surface.draw(&DrawCommand::Line {
            from: spark.pos - spark.vel * 2.0,
            to: spark.pos,
            color: spark.color.with_alpha(scale * 0.8 * spark.alpha),
            width: radius * 2.0,
        });
        surface.draw(&DrawCommand::FillCircle {
            center: spark.pos,
            radius,
            paint: spark.color.with_alpha(scale * spark.alpha).into(),
            glow: Some(Glow {
                blur: SPARK_GLOW,
                color: spark.color,
            }),
        });
    }
    for puff in &state.smoke {
        surface.draw(&DrawCommand::FillCircle {
            center: puff.pos,
            radius: puff.radius,
            paint: puff.color.with_alpha(puff.fade() * 0.5).into(),
            glow: None,
        });
    }

    draw_player(surface, state);
}

/// Cycling laser hue: one full turn every 1.8 s of session time
pub fn laser_color(clock_ms: f64) -> Color {
    Color::hsl(((clock_ms / 5.0) % 360.0) as f32, 1.0, 0.5)
}

/// Pseudo-random 0-1 flicker that only depends on the clock
fn flicker(clock_ms: f64) -> f32 {
    ((clock_ms * 12.9898).sin() * 43_758.545).fract().abs() as f32
}

fn draw_bullet(surface: &mut dyn Surface, bullet: &Bullet, laser: Color, trails: bool) {
    if bullet.kind == BulletKind::Missile && trails {
        for (i, point) in bullet.trail.iter().enumerate() {
            let radius = i as f32 / 4.0;
            if radius <= 0.0 {
                continue;
            }
            surface.draw(&DrawCommand::FillCircle {
                center: point.pos,
                radius,
                paint: palette::MISSILE_TRAIL.with_alpha(point.alpha * 0.5).into(),
                glow: None,
            });
        }
    }

    let color = match bullet.kind {
        BulletKind::Laser => laser,
        _ => bullet.color,
    };
    surface.draw(&DrawCommand::FillRect {
        rect: bullet.rect,
        paint: color.into(),
        glow: Some(Glow {
            blur: BULLET_GLOW,
            color,
        }),
    });
}

fn draw_enemy(surface: &mut dyn Surface, enemy: &Enemy) {
    match (enemy.kind, &enemy.shape) {
        (EnemyKind::Asteroid, Some(shape)) => {
            let points = shapes::translate(shape, enemy.rect.center());
            surface.draw(&DrawCommand::FillPolygon {
                points: points.clone(),
                paint: palette::ASTEROID_FILL.into(),
            });
            surface.draw(&DrawCommand::StrokePolygon {
                points,
                color: palette::ASTEROID_EDGE,
                line_width: OUTLINE_WIDTH,
            });
        }
        (EnemyKind::Asteroid, None) => {
            surface.draw(&DrawCommand::FillRect {
                rect: enemy.rect,
                paint: palette::ASTEROID_FILL.into(),
                glow: None,
            });
        }
        (EnemyKind::Invader, _) => {
            for block in shapes::invader_blocks(&enemy.rect) {
                surface.draw(&DrawCommand::FillRect {
                    rect: block,
                    paint: palette::INVADER.into(),
                    glow: Some(Glow {
                        blur: INVADER_GLOW,
                        color: palette::INVADER,
                    }),
                });
            }
        }
    }
}

fn draw_bonus_item(surface: &mut dyn Surface, item: &BonusItem) {
    let rect = item.rect;
    match item.kind {
        BonusKind::Shield => {
            surface.draw(&DrawCommand::FillRect {
                rect,
                paint: palette::SHIELD_ITEM.into(),
                glow: None,
            });
            surface.draw(&DrawCommand::StrokeRect {
                rect,
                color: palette::SHIELD_ITEM_EDGE,
                line_width: OUTLINE_WIDTH,
            });
            surface.draw(&DrawCommand::Text {
                text: "S".to_string(),
                pos: rect.center() + Vec2::new(0.0, 5.0),
                color: palette::GLYPH,
                font: BONUS_GLYPH_FONT.to_string(),
            });
        }
        BonusKind::Score => {
            surface.draw(&DrawCommand::FillRect {
                rect,
                paint: palette::SCORE_ITEM.into(),
                glow: None,
            });
            let center = rect.center();
            let bars = [
                Rect::new(rect.x, center.y - 2.0, rect.width, 4.0),
                Rect::new(center.x - 2.0, rect.y, 4.0, rect.height),
            ];
            for bar in bars {
                surface.draw(&DrawCommand::FillRect {
                    rect: bar,
                    paint: palette::SCORE_ITEM_CROSS.into(),
                    glow: None,
                });
            }
        }
    }
}

fn draw_player(surface: &mut dyn Surface, state: &GameState) {
    let ship = &state.player.rect;

    let hull = shapes::ship_hull(ship);
    surface.draw(&DrawCommand::FillPolygon {
        points: hull.clone(),
        paint: palette::SHIP_HULL.into(),
    });
    surface.draw(&DrawCommand::StrokePolygon {
        points: hull,
        color: palette::SHIP_EDGE,
        line_width: OUTLINE_WIDTH,
    });
    for fin in shapes::ship_fins(ship) {
        surface.draw(&DrawCommand::FillPolygon {
            points: fin,
            paint: palette::SHIP_FIN.into(),
        });
    }
    surface.draw(&DrawCommand::FillCircle {
        center: shapes::ship_cockpit(ship),
        radius: COCKPIT_RADIUS,
        paint: palette::SHIP_COCKPIT.into(),
        glow: None,
    });

    if state.player.invincible {
        let radius = ship.width / 2.0 * 1.5;
        surface.draw(&DrawCommand::FillCircle {
            center: ship.center(),
            radius,
            paint: Paint::Radial {
                center: ship.center(),
                inner_radius: radius * 0.5,
                outer_radius: radius,
                stops: vec![
                    ColorStop::new(0.0, Color::rgba(0, 150, 255, 0.0)),
                    ColorStop::new(0.8, Color::rgba(0, 150, 255, 0.5)),
                    ColorStop::new(1.0, Color::rgba(100, 200, 255, 0.8)),
                ],
            },
            glow: None,
        });
    }

    if state.thrusting {
        let flicker = flicker(state.clock_ms);
        let flame = shapes::exhaust_flame(ship, flicker);
        let core = Color::rgba(255, (150.0 + flicker * 105.0) as u8, 0, 0.8);
        surface.draw(&DrawCommand::FillPolygon {
            paint: Paint::Linear {
                from: Vec2::new(ship.center_x(), ship.bottom()),
                to: flame[2],
                stops: vec![ColorStop::new(0.0, core), ColorStop::new(1.0, core.with_alpha(0.0))],
            },
            points: flame,
        });
    }
}
