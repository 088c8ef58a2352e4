//! Color output: sample averaging, gamma encoding, and PPM writing.

use std::io::{self, Write};

use ember_math::Vec3;

use crate::renderer::ImageBuffer;

/// Write one pixel as `r g b` integers in `[0, 255]`.
///
/// The accumulated color is divided by the sample count, gamma
/// encoded with `c^(1/gamma)`, and quantized. NaN channels, which a
/// stray 0/0 in shading can produce, are replaced with zero so a
/// single bad sample cannot blow out a pixel.
pub fn write_color(
    out: &mut dyn Write,
    color: Vec3,
    samples_per_pixel: u32,
    gamma: f32,
) -> io::Result<()> {
    let mut r = color.x;
    let mut g = color.y;
    let mut b = color.z;
    if r.is_nan() {
        r = 0.0;
    }
    if g.is_nan() {
        g = 0.0;
    }
    if b.is_nan() {
        b = 0.0;
    }

    let scale = 1.0 / samples_per_pixel as f32;
    let inv_gamma = 1.0 / gamma;
    r = (scale * r).powf(inv_gamma);
    g = (scale * g).powf(inv_gamma);
    b = (scale * b).powf(inv_gamma);

    writeln!(
        out,
        "{} {} {}",
        (256.0 * r.clamp(0.0, 0.999)) as i32,
        (256.0 * g.clamp(0.0, 0.999)) as i32,
        (256.0 * b.clamp(0.0, 0.999)) as i32
    )
}

/// Default display gamma.
pub const DEFAULT_GAMMA: f32 = 2.2;

/// Write a plain-text PPM (P3) image. The buffer already holds
/// per-pixel averages, so the sample count here is 1.
pub fn write_ppm(out: &mut dyn Write, image: &ImageBuffer, gamma: f32) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;
    for y in 0..image.height {
        for x in 0..image.width {
            write_color(out, image.get(x, y), 1, gamma)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(color: Vec3, samples: u32, gamma: f32) -> String {
        let mut buf = Vec::new();
        write_color(&mut buf, color, samples, gamma).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn nan_channels_become_zero() {
        let line = encode(Vec3::new(f32::NAN, 4.0, 0.25), 1, 2.0);
        // 4.0 clamps to 255; sqrt(0.25) = 0.5 maps to 128.
        assert_eq!(line, "0 255 128\n");
    }

    #[test]
    fn channels_clamp_to_255() {
        let line = encode(Vec3::splat(100.0), 1, 2.2);
        assert_eq!(line, "255 255 255\n");
    }

    #[test]
    fn black_stays_black() {
        let line = encode(Vec3::ZERO, 1, 2.2);
        assert_eq!(line, "0 0 0\n");
    }

    #[test]
    fn sample_count_averages() {
        // 10 accumulated samples of 0.25 each, gamma 1 for a linear
        // check: 0.25 * 256 = 64.
        let line = encode(Vec3::splat(2.5), 10, 1.0);
        assert_eq!(line, "64 64 64\n");
    }

    #[test]
    fn gamma_brightens_midtones() {
        let linear = encode(Vec3::splat(0.25), 1, 1.0);
        let encoded = encode(Vec3::splat(0.25), 1, 2.2);
        let linear_value: i32 = linear.split_whitespace().next().unwrap().parse().unwrap();
        let encoded_value: i32 = encoded.split_whitespace().next().unwrap().parse().unwrap();
        assert!(encoded_value > linear_value);
    }

    #[test]
    fn ppm_header_and_size() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Vec3::ONE);
        let mut buf = Vec::new();
        write_ppm(&mut buf, &image, DEFAULT_GAMMA).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("2 2"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.count(), 4);
    }
}
