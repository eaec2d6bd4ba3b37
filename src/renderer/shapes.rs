//! Shape generation for 2D primitives

use glam::Vec2;

use crate::sim::collision::Rect;

/// Invader sprite as (column, row, width, height) in 1/8th-of-width pixels
const INVADER_PIXELS: [(f32, f32, f32, f32); 9] = [
    (3.0, 0.0, 2.0, 1.0),
    (2.0, 1.0, 4.0, 1.0),
    (1.0, 2.0, 6.0, 1.0),
    (0.0, 3.0, 2.0, 1.0),
    (3.0, 3.0, 2.0, 1.0),
    (6.0, 3.0, 2.0, 1.0),
    (0.0, 4.0, 8.0, 1.0),
    (1.0, 5.0, 2.0, 1.0),
    (5.0, 5.0, 2.0, 1.0),
];

/// Fin overhang past the hull sides
const FIN_SPAN: f32 = 10.0;

/// Base flame length below the hull; flicker adds up to `FLAME_FLICKER`
const FLAME_LENGTH: f32 = 15.0;
const FLAME_FLICKER: f32 = 10.0;

/// Ship hull: pointed nose, straight sides from 30% down
pub fn ship_hull(ship: &Rect) -> Vec<Vec2> {
    let shoulder = ship.y + ship.height * 0.3;
    vec![
        Vec2::new(ship.center_x(), ship.y),
        Vec2::new(ship.x, shoulder),
        Vec2::new(ship.x, ship.bottom()),
        Vec2::new(ship.right(), ship.bottom()),
        Vec2::new(ship.right(), shoulder),
    ]
}

/// Left and right tail fins
pub fn ship_fins(ship: &Rect) -> [Vec<Vec2>; 2] {
    let root = ship.y + ship.height * 0.8;
    [
        vec![
            Vec2::new(ship.x, root),
            Vec2::new(ship.x - FIN_SPAN, ship.bottom()),
            Vec2::new(ship.x, ship.bottom()),
        ],
        vec![
            Vec2::new(ship.right(), root),
            Vec2::new(ship.right() + FIN_SPAN, ship.bottom()),
            Vec2::new(ship.right(), ship.bottom()),
        ],
    ]
}

/// Cockpit dome center
pub fn ship_cockpit(ship: &Rect) -> Vec2 {
    Vec2::new(ship.center_x(), ship.y + ship.height * 0.3)
}

/// Exhaust flame triangle; `flicker` in 0-1 stretches the tip
pub fn exhaust_flame(ship: &Rect, flicker: f32) -> Vec<Vec2> {
    let tip = ship.bottom() + FLAME_LENGTH + flicker.clamp(0.0, 1.0) * FLAME_FLICKER;
    vec![
        Vec2::new(ship.x + ship.width * 0.25, ship.bottom()),
        Vec2::new(ship.x + ship.width * 0.75, ship.bottom()),
        Vec2::new(ship.center_x(), tip),
    ]
}

/// Pixel blocks making up an invader inside its bounding box
pub fn invader_blocks(enemy: &Rect) -> Vec<Rect> {
    let p = enemy.width / 8.0;
    INVADER_PIXELS
        .iter()
        .map(|&(col, row, w, h)| Rect::new(enemy.x + col * p, enemy.y + row * p, w * p, h * p))
        .collect()
}

/// Place center-relative outline offsets around `center`
pub fn translate(offsets: &[Vec2], center: Vec2) -> Vec<Vec2> {
    offsets.iter().map(|&o| center + o).collect()
}
