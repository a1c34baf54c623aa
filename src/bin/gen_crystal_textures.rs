use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

const SIZE: u32 = 256;
const ENV_WIDTH: u32 = 512;
const ENV_HEIGHT: u32 = 256;

/// Base crystal colors: (file stem, light rgb, dark rgb).
const CRYSTALS: [(&str, [u8; 3], [u8; 3]); 5] = [
    ("crystal_blue", [150, 205, 255], [30, 70, 160]),
    ("crystal_smoke", [200, 200, 215], [60, 60, 75]),
    ("crystal_purple", [215, 160, 255], [80, 30, 140]),
    ("crystal_amber", [255, 205, 120], [150, 80, 10]),
    ("crystal_gold", [255, 235, 150], [170, 120, 20]),
];

fn main() {
    let out_dir = PathBuf::from("assets/textures");
    fs::create_dir_all(&out_dir).expect("create output dir");

    for (index, (stem, light, dark)) in CRYSTALS.iter().enumerate() {
        let image = build_crystal(*light, *dark, 0xC0FFEE + index as u64);
        write_png(&out_dir.join(format!("{stem}.png")), &image);
    }

    write_png(&out_dir.join("rune.png"), &build_rune());
    write_png(&out_dir.join("environment.png"), &build_environment());

    println!("Wrote crystal textures to {}", out_dir.display());
}

fn write_png(path: &Path, image: &RgbaImage) {
    image
        .save(path)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t.clamp(0.0, 1.0)).round() as u8
}

/// Radial gradient from a light core to dark edges, broken up by a few
/// random "inclusion" streaks.
fn build_crystal(light: [u8; 3], dark: [u8; 3], seed: u64) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let streaks: Vec<(f32, f32, f32)> = (0..6)
        .map(|_| {
            (
                rng.gen_range(0.0..std::f32::consts::PI),
                rng.gen_range(-0.4..0.4),
                rng.gen_range(0.02..0.06),
            )
        })
        .collect();

    let mut image = RgbaImage::new(SIZE, SIZE);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let u = x as f32 / (SIZE - 1) as f32 * 2.0 - 1.0;
        let v = y as f32 / (SIZE - 1) as f32 * 2.0 - 1.0;
        let mut t = (u * u + v * v).sqrt() / std::f32::consts::SQRT_2;

        for (angle, offset, width) in &streaks {
            let distance = (u * angle.sin() - v * angle.cos() - offset).abs();
            if distance < *width {
                t -= 0.25 * (1.0 - distance / width);
            }
        }

        *pixel = Rgba([
            lerp(light[0], dark[0], t),
            lerp(light[1], dark[1], t),
            lerp(light[2], dark[2], t),
            255,
        ]);
    }
    image
}

/// Alpha mask read from the red channel: opaque rim with translucent rune
/// strokes.
fn build_rune() -> RgbaImage {
    let mut image = RgbaImage::from_pixel(SIZE, SIZE, Rgba([255, 255, 255, 255]));
    let c = SIZE as f32 / 2.0;
    let stroke = SIZE as f32 * 0.03;

    let segments = [
        // Stave
        ((c, c - 70.0), (c, c + 70.0)),
        // Arms
        ((c, c - 40.0), (c + 45.0, c - 75.0)),
        ((c, c - 40.0), (c - 45.0, c - 75.0)),
        ((c, c + 10.0), (c + 45.0, c + 45.0)),
        ((c, c + 10.0), (c - 45.0, c + 45.0)),
    ];

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let p = (x as f32, y as f32);
        let near = segments
            .iter()
            .map(|(a, b)| segment_distance(p, *a, *b))
            .fold(f32::MAX, f32::min);
        let ring = (((p.0 - c).powi(2) + (p.1 - c).powi(2)).sqrt() - c * 0.82).abs();
        let d = near.min(ring);
        if d < stroke {
            let value = lerp(70, 255, d / stroke);
            *pixel = Rgba([value, value, value, 255]);
        }
    }
    image
}

fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (dx, dy) = (apx - abx * t, apy - aby * t);
    (dx * dx + dy * dy).sqrt()
}

/// Equirectangular sky over a dark floor with two soft light blobs.
fn build_environment() -> RgbaImage {
    let lights = [(0.25_f32, 0.3_f32, [255.0, 240.0, 220.0]), (0.7, 0.2, [180.0, 210.0, 255.0])];

    let mut image = RgbaImage::new(ENV_WIDTH, ENV_HEIGHT);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let u = x as f32 / ENV_WIDTH as f32;
        let v = y as f32 / ENV_HEIGHT as f32;

        let mut rgb = if v < 0.5 {
            let t = v / 0.5;
            [60.0 + 60.0 * t, 80.0 + 60.0 * t, 120.0 + 50.0 * t]
        } else {
            let t = (v - 0.5) / 0.5;
            [40.0 - 25.0 * t, 38.0 - 25.0 * t, 45.0 - 25.0 * t]
        };

        for (lu, lv, color) in &lights {
            let du = (u - lu).abs().min(1.0 - (u - lu).abs());
            let dv = v - lv;
            let falloff = (-(du * du + dv * dv) / 0.004).exp();
            for i in 0..3 {
                rgb[i] += color[i] * falloff;
            }
        }

        *pixel = Rgba([
            rgb[0].clamp(0.0, 255.0) as u8,
            rgb[1].clamp(0.0, 255.0) as u8,
            rgb[2].clamp(0.0, 255.0) as u8,
            255,
        ]);
    }
    image
}
