use crate::canvas::{Canvas, Rgb};
use crate::grid::Pos;
use crate::random::RandomSource;
use crate::sim::GridAgentSimulation;

const BACKGROUND: Rgb = (10, 12, 20);
const SNAKE_GLOW: Rgb = (40, 220, 140);
const SNAKE_HEAD: Rgb = (140, 255, 190);
const COIN: Rgb = (255, 200, 40);
const COIN_GLOW: Rgb = (255, 170, 20);
const COIN_MARK: Rgb = (120, 80, 0);
const FLASH: Rgb = (255, 250, 220);

const DOLLAR: [u8; 7] = [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100];

/// Glow scalar in `[0, 1]` driving the coin pulse.
pub fn pulse(timestamp_ms: f64) -> f32 {
    (((timestamp_ms / 400.0).sin() + 1.0) * 0.5) as f32
}

/// Paints one frame of `sim`. Reads state only.
pub fn paint<R: RandomSource>(sim: &GridAgentSimulation<R>, canvas: &mut Canvas, timestamp_ms: f64) {
    canvas.clear(BACKGROUND);
    if sim.is_dormant() {
        return;
    }

    let cell = sim.config().cell_size.max(1) as f32;
    let center = |p: Pos| (p.x as f32 * cell + cell * 0.5, p.y as f32 * cell + cell * 0.5);
    let glow = pulse(timestamp_ms);

    let agent = sim.agent();
    let len = agent.len().max(1) as f32;
    let heat = |i: usize| (i + 1) as f32 / len;
    let head_index = agent.len().saturating_sub(1);

    // Trail glow, brighter toward the head.
    for (i, p) in agent.segments().enumerate() {
        let (cx, cy) = center(p);
        canvas.fill_glow(cx, cy, cell * 1.1, SNAKE_GLOW, (20.0 + 70.0 * heat(i)) as u8);
    }

    for (i, p) in agent.segments().enumerate() {
        let (cx, cy) = center(p);
        if i == head_index {
            canvas.fill_circle(cx, cy, cell * 0.48, SNAKE_HEAD, 255);
        } else {
            let t = heat(i);
            let body = (30, (120.0 + 100.0 * t) as u8, (70.0 + 60.0 * t) as u8);
            canvas.fill_circle(cx, cy, cell * 0.36, body, (110.0 + 145.0 * t) as u8);
        }
    }

    let centers: Vec<(f32, f32)> = agent.segments().map(center).collect();
    for (i, pair) in centers.windows(2).enumerate() {
        let t = heat(i + 1);
        canvas.line(pair[0], pair[1], cell * 0.3, SNAKE_GLOW, (90.0 + 120.0 * t) as u8);
    }

    for &target in sim.targets() {
        let (cx, cy) = center(target);
        canvas.fill_glow(cx, cy, cell * (0.9 + 0.4 * glow), COIN_GLOW, (70.0 + 80.0 * glow) as u8);
    }

    let scale = ((cell / 14.0) as u32).max(1);
    let glyph_w = 5 * scale as i32;
    let glyph_h = 7 * scale as i32;
    for &target in sim.targets() {
        let (cx, cy) = center(target);
        canvas.fill_circle(cx, cy, cell * (0.36 + 0.05 * glow), COIN, 255);
        canvas.draw_glyph(&DOLLAR, cx as i32 - glyph_w / 2, cy as i32 - glyph_h / 2, scale, COIN_MARK, 230);
    }

    let lifetime = sim.config().effect_lifetime_frames;
    for event in sim.effects() {
        let p = event.progress(lifetime);
        let fade = 1.0 - p;
        let (cx, cy) = center(event.pos);
        canvas.stroke_circle(cx, cy, cell * (0.5 + 1.5 * p), 2.0 + cell * 0.1 * fade, COIN, (255.0 * fade) as u8);
        canvas.fill_circle(cx, cy, cell * 0.5 * fade, FLASH, (200.0 * fade) as u8);
    }
}
