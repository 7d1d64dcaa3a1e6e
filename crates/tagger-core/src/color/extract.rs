//! Dominant color extraction via k-means clustering in Lab space.
//!
//! Clustering is deterministic: pixels are subsampled with a fixed stride and
//! centers are seeded by k-means++ from a seeded RNG, so the same image and
//! config always yield the same palette.

use image::DynamicImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::PaletteConfig;

use super::named::{find_closest, NamedColor};
use super::space::{Color, Lab};

/// One dominant color of an image.
#[derive(Debug, Clone)]
pub struct PaletteEntry {
    pub color: Color,
    /// Fraction of sampled pixels assigned to this color.
    pub share: f32,
}

impl PaletteEntry {
    /// The nearest named reference color.
    pub fn closest(&self) -> &'static NamedColor {
        find_closest(&self.color)
    }

    /// Serializable summary (hex, nearest name, share).
    pub fn summary(&self) -> PaletteSummary {
        let named = self.closest();
        PaletteSummary {
            hex: self.color.to_hex(),
            name: named.name,
            share: self.share,
        }
    }
}

/// Output shape for palette listings.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteSummary {
    pub hex: String,
    pub name: &'static str,
    pub share: f32,
}

/// Extracts dominant colors with a fixed configuration.
pub struct PaletteExtractor {
    config: PaletteConfig,
}

impl PaletteExtractor {
    pub fn new(config: PaletteConfig) -> Self {
        Self { config }
    }

    /// Return up to `config.colors` dominant colors, most populous first.
    ///
    /// Images with fewer distinct colors than requested return fewer entries;
    /// an empty image returns none.
    pub fn extract(&self, image: &DynamicImage) -> Vec<PaletteEntry> {
        self.extract_k(image, self.config.colors)
    }

    fn extract_k(&self, image: &DynamicImage, k: usize) -> Vec<PaletteEntry> {
        let samples = self.sample(image);
        if samples.is_empty() || k == 0 {
            return vec![];
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut centers = seed_centers(&samples, k, &mut rng);
        let mut assignment = vec![0usize; samples.len()];

        for iteration in 0..self.config.iterations.max(1) {
            for (slot, point) in assignment.iter_mut().zip(&samples) {
                *slot = nearest(&centers, point);
            }

            let mut sums = vec![[0.0f64; 3]; centers.len()];
            let mut counts = vec![0usize; centers.len()];
            for (&cluster, point) in assignment.iter().zip(&samples) {
                counts[cluster] += 1;
                for (sum, value) in sums[cluster].iter_mut().zip(point) {
                    *sum += value;
                }
            }

            let mut max_shift: f64 = 0.0;
            for (i, center) in centers.iter_mut().enumerate() {
                // Empty clusters keep their previous center
                if counts[i] == 0 {
                    continue;
                }
                let n = counts[i] as f64;
                let updated = sums[i].map(|s| s / n);
                max_shift = max_shift.max(distance_sq(center, &updated).sqrt());
                *center = updated;
            }

            if max_shift <= self.config.epsilon {
                tracing::trace!("k-means converged after {} iterations", iteration + 1);
                break;
            }
        }

        for (slot, point) in assignment.iter_mut().zip(&samples) {
            *slot = nearest(&centers, point);
        }
        let mut counts = vec![0usize; centers.len()];
        for &cluster in &assignment {
            counts[cluster] += 1;
        }

        let mut order: Vec<usize> = (0..centers.len()).filter(|&i| counts[i] > 0).collect();
        order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));

        let total = samples.len() as f32;
        order
            .into_iter()
            .map(|i| {
                let [l, a, b] = centers[i];
                PaletteEntry {
                    color: Color::from_lab(Lab::new(l, a, b)),
                    share: counts[i] as f32 / total,
                }
            })
            .collect()
    }

    /// Lab values of at most `max_samples` evenly strided pixels.
    fn sample(&self, image: &DynamicImage) -> Vec<[f64; 3]> {
        let rgb = image.to_rgb8();
        let pixel_count = (rgb.width() as usize) * (rgb.height() as usize);
        if pixel_count == 0 {
            return vec![];
        }
        let stride = pixel_count.div_ceil(self.config.max_samples.max(1));
        rgb.pixels()
            .step_by(stride)
            .map(|p| {
                let lab = Color::from_rgb(p[0], p[1], p[2]).to_lab();
                [lab.l, lab.a, lab.b]
            })
            .collect()
    }
}

/// The `k` dominant colors of an image using default clustering settings.
pub fn extract_palette(image: &DynamicImage, k: usize) -> Vec<PaletteEntry> {
    PaletteExtractor::new(PaletteConfig::default()).extract_k(image, k)
}

/// k-means++ seeding. Stops early when every sample already sits on a center.
fn seed_centers(samples: &[[f64; 3]], k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let mut centers = vec![samples[rng.gen_range(0..samples.len())]];
    let mut weights: Vec<f64> = samples
        .iter()
        .map(|p| distance_sq(p, &centers[0]))
        .collect();

    while centers.len() < k {
        let total: f64 = weights.iter().sum();
        if total <= f64::EPSILON {
            break;
        }

        let mut target = rng.gen::<f64>() * total;
        let mut chosen = samples.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                chosen = i;
                break;
            }
            target -= w;
        }

        let center = samples[chosen];
        for (w, p) in weights.iter_mut().zip(samples) {
            *w = w.min(distance_sq(p, &center));
        }
        centers.push(center);
    }
    centers
}

fn nearest(centers: &[[f64; 3]], point: &[f64; 3]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, center) in centers.iter().enumerate() {
        let d = distance_sq(center, point);
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

fn distance_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn two_tone(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb(left)
            } else {
                Rgb(right)
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_two_tone_image() {
        let img = two_tone(40, 20, [0xE7, 0x25, 0x25], [0x00, 0x00, 0xFF]);
        let palette = extract_palette(&img, 2);

        assert_eq!(palette.len(), 2);
        let mut names: Vec<&str> = palette.iter().map(|e| e.closest().name).collect();
        names.sort();
        assert_eq!(names, vec!["blue", "red"]);
        for entry in &palette {
            assert!((entry.share - 0.5).abs() < 0.01);
        }
    }

    #[test]
    fn test_dominant_color_first() {
        let img = RgbImage::from_fn(30, 30, |x, _| {
            if x < 24 {
                Rgb([0x06, 0xD5, 0x06])
            } else {
                Rgb([0xFF, 0xFF, 0xFF])
            }
        });
        let palette = extract_palette(&DynamicImage::ImageRgb8(img), 2);
        assert_eq!(palette[0].closest().name, "green");
        assert!(palette[0].share > palette[1].share);
    }

    #[test]
    fn test_uniform_image_yields_single_color() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([0x0E, 0xCB, 0x9C])));
        let palette = extract_palette(&img, 5);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette[0].color.to_hex(), "#0ECB9C");
        assert_eq!(palette[0].share, 1.0);
    }

    #[test]
    fn test_empty_image() {
        let img = DynamicImage::new_rgb8(0, 0);
        assert!(extract_palette(&img, 3).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let img = RgbImage::from_fn(32, 32, |x, y| Rgb([(x * 8) as u8, (y * 8) as u8, 128]));
        let img = DynamicImage::ImageRgb8(img);
        let a: Vec<String> = extract_palette(&img, 4).iter().map(|e| e.color.to_hex()).collect();
        let b: Vec<String> = extract_palette(&img, 4).iter().map(|e| e.color.to_hex()).collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn test_subsampling_caps_work() {
        let config = PaletteConfig {
            max_samples: 10,
            ..PaletteConfig::default()
        };
        let extractor = PaletteExtractor::new(config);
        let img = two_tone(100, 100, [0, 0, 0], [255, 255, 255]);
        assert_eq!(extractor.sample(&img).len(), 10);
    }
}
