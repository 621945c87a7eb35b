use rand::Rng;

use crate::engine::surface::Color;
use crate::game::config::CircuitConfig;

/// Decorations are only considered on every tenth segment.
const DECORATION_STRIDE: usize = 10;
/// Closest a decoration may stand to the centreline, in road half-widths.
const DECORATION_MIN_OFFSET: f64 = 1.8;
const DECORATION_SPREAD: f64 = 8.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentColors {
    pub road: Color,
    pub grass: Color,
    pub rumble: Color,
    pub lane: Color,
}

impl Palette {
    pub fn for_index(index: usize, rumble_length: usize) -> Palette {
        if (index / rumble_length) % 2 == 1 {
            Palette::Dark
        } else {
            Palette::Light
        }
    }

    pub fn colors(self) -> SegmentColors {
        match self {
            Palette::Dark => SegmentColors {
                road: Color(0x050505),
                grass: Color(0x2d0245),
                rumble: Color(0xff00ff),
                lane: Color(0xffff00),
            },
            Palette::Light => SegmentColors {
                road: Color(0x0a0a0a),
                grass: Color(0x420361),
                rumble: Color(0x950095),
                lane: Color(0x0a0a0a),
            },
        }
    }

    /// A lane stripe is painted only when it would differ from the asphalt.
    pub fn has_lane_stripe(self) -> bool {
        let colors = self.colors();
        colors.lane != colors.road
    }
}

/// A roadside palm tree, positioned in road half-widths from the centreline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub lateral: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub world_z: f64,
    pub decoration: Option<Decoration>,
    pub palette: Palette,
}

/// One entry of the visible window, with its depth corrected across the seam.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowSlot {
    pub index: usize,
    pub world_z: f64,
    pub seam_offset: f64,
}

/// The closed loop of road segments.
pub struct Circuit {
    segments: Vec<Segment>,
    segment_length: f64,
    road_half_width: f64,
    total_length: f64,
}

impl Circuit {
    pub fn build<R: Rng + ?Sized>(config: &CircuitConfig, rng: &mut R) -> Self {
        let rumble_length = config.rumble_length.max(1);
        let mut segments = Vec::with_capacity(config.segment_count);

        for n in 0..config.segment_count {
            let mut decoration = None;
            if n > config.min_decoration_index && n % DECORATION_STRIDE == 0 {
                if rng.gen::<f64>() < config.decoration_probability {
                    let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                    let lateral = side * (DECORATION_MIN_OFFSET + rng.gen::<f64>() * DECORATION_SPREAD);
                    decoration = Some(Decoration { lateral });
                }
            }

            segments.push(Segment {
                index: n,
                world_z: n as f64 * config.segment_length,
                decoration,
                palette: Palette::for_index(n, rumble_length),
            });
        }

        let total_length = segments.len() as f64 * config.segment_length;
        log::debug!(
            "built circuit: {} segments, {} decorated, total length {}",
            segments.len(),
            segments.iter().filter(|s| s.decoration.is_some()).count(),
            total_length
        );

        Circuit {
            segments,
            segment_length: config.segment_length,
            road_half_width: config.road_half_width,
            total_length,
        }
    }

    /// Segment owning world position `z`, wrapping around the loop.
    ///
    /// Panics if the circuit is empty or has zero length; callers validate
    /// the configuration before the frame loop starts.
    pub fn segment_at(&self, z: f64) -> &Segment {
        assert!(
            self.total_length > 0.0 && !self.is_empty(),
            "segment_at on an empty circuit"
        );
        let wrapped = self.wrap(z);
        let index = (wrapped / self.segment_length).floor() as usize;
        // rem_euclid may round up to exactly total_length for tiny negative z.
        &self.segments[index.min(self.segments.len() - 1)]
    }

    /// The `count` segments after `base`, farthest first.
    ///
    /// Segments past the end of the loop keep increasing in depth: their
    /// `world_z` carries one extra `total_length`.
    pub fn window(&self, base: usize, count: usize) -> impl Iterator<Item = WindowSlot> + '_ {
        let len = self.segments.len();
        (1..=count).rev().map(move |n| {
            let index = (base + n) % len;
            let seam_offset = if index < base { self.total_length } else { 0.0 };
            WindowSlot {
                index,
                world_z: index as f64 * self.segment_length + seam_offset,
                seam_offset,
            }
        })
    }

    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn road_half_width(&self) -> f64 {
        self.road_half_width
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Wraps a longitudinal position into `[0, total_length)`.
    pub fn wrap(&self, z: f64) -> f64 {
        z.rem_euclid(self.total_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn circuit(count: usize) -> Circuit {
        let config = CircuitConfig { segment_count: count, ..CircuitConfig::default() };
        Circuit::build(&config, &mut SmallRng::seed_from_u64(7))
    }

    #[test]
    fn segment_at_matches_floor_division() {
        let c = circuit(1500);
        for z in [0.0, 1.0, 99.9, 100.0, 12_345.6, 74_999.0, 149_999.5] {
            assert_eq!(c.segment_at(z).index, (z / 100.0).floor() as usize);
        }
    }

    #[test]
    fn segment_at_wraps_around_the_loop() {
        let c = circuit(1500);
        let total = c.total_length();
        assert_eq!(total, 150_000.0);
        for z in [0.0, 250.0, 5_000.0, 149_900.0] {
            assert_eq!(c.segment_at(z + total).index, c.segment_at(z).index);
            assert_eq!(c.segment_at(z + 3.0 * total).index, c.segment_at(z).index);
        }
        assert_eq!(c.segment_at(-50.0).index, 1499);
    }

    #[test]
    fn wrap_folds_positions_into_the_loop() {
        let c = circuit(1500);
        assert_eq!(c.wrap(150_080.0), 80.0);
        assert_eq!(c.wrap(-100.0), 149_900.0);
        assert!(!c.is_empty());
        assert!(circuit(0).is_empty());
    }

    #[test]
    #[should_panic(expected = "empty circuit")]
    fn segment_at_on_empty_circuit_panics() {
        circuit(0).segment_at(10.0);
    }

    #[test]
    fn striping_alternates_every_rumble_length() {
        let c = circuit(30);
        let palettes: Vec<Palette> = c.segments()[..9].iter().map(|s| s.palette).collect();
        use Palette::*;
        assert_eq!(palettes, vec![Light, Light, Light, Dark, Dark, Dark, Light, Light, Light]);
        for s in c.segments() {
            let expected = if (s.index / 3) % 2 == 1 { Dark } else { Light };
            assert_eq!(s.palette, expected);
        }
    }

    #[test]
    fn only_dark_palette_paints_lane_stripes() {
        assert!(Palette::Dark.has_lane_stripe());
        assert!(!Palette::Light.has_lane_stripe());
    }

    #[test]
    fn decorations_respect_clear_zone_and_stride() {
        let c = circuit(1500);
        for s in c.segments() {
            if let Some(d) = s.decoration {
                assert!(s.index > 100);
                assert_eq!(s.index % 10, 0);
                assert!(d.lateral.abs() >= 1.8 && d.lateral.abs() < 10.0);
            }
        }
        assert!(c.segments().iter().any(|s| s.decoration.is_some()));
    }

    #[test]
    fn decoration_probability_extremes() {
        let never = CircuitConfig { decoration_probability: 0.0, ..CircuitConfig::default() };
        let c = Circuit::build(&never, &mut SmallRng::seed_from_u64(1));
        assert!(c.segments().iter().all(|s| s.decoration.is_none()));

        let always = CircuitConfig { decoration_probability: 1.0, ..CircuitConfig::default() };
        let c = Circuit::build(&always, &mut SmallRng::seed_from_u64(1));
        let eligible = (101..1500).filter(|n| n % 10 == 0).count();
        assert_eq!(c.segments().iter().filter(|s| s.decoration.is_some()).count(), eligible);
    }

    #[test]
    fn same_seed_builds_same_circuit() {
        let a = circuit(1500);
        let b = circuit(1500);
        assert_eq!(a.segments(), b.segments());
    }

    #[test]
    fn window_is_monotonic_across_the_seam() {
        let c = circuit(1500);
        let slots: Vec<WindowSlot> = c.window(1400, 200).collect();
        assert_eq!(slots.len(), 200);
        assert_eq!(slots[0].index, 100);
        assert_eq!(slots[199].index, 1401);

        // Far-to-near order means depth strictly decreases along the iterator.
        for pair in slots.windows(2) {
            assert!(pair[0].world_z > pair[1].world_z);
        }
        assert_eq!(slots[0].world_z, 100.0 * 100.0 + 150_000.0);
        assert_eq!(slots[0].seam_offset, 150_000.0);
        assert_eq!(slots[199].seam_offset, 0.0);
    }

    #[test]
    fn window_without_seam_has_no_offset() {
        let c = circuit(1500);
        assert!(c.window(0, 200).all(|slot| slot.seam_offset == 0.0));
    }
}
