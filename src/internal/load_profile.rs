#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(missing_docs)]

use std::hash::BuildHasher;

use log::info;
use plotters::prelude::*;
use probechain::{AdditiveState, ChainingMap, OpenAddressingMap, PositionalState};
use rand::Rng;

const KEY_COUNT: usize = 5_000;
// A sample is recorded every STEP insertions
const STEP: usize = 100;
const WORD_LENGTHS: std::ops::RangeInclusive<usize> = 3..=10;

/// A map whose load can be observed while it fills up
trait Profiled {
    fn insert(&mut self, key: &str);
    fn load_factor(&self) -> f64;
    fn empty_buckets(&self) -> usize;
}

impl<S: BuildHasher> Profiled for OpenAddressingMap<String, (), S> {
    fn insert(&mut self, key: &str) {
        self.put(key.to_string(), ());
    }

    fn load_factor(&self) -> f64 {
        OpenAddressingMap::load_factor(self)
    }

    fn empty_buckets(&self) -> usize {
        OpenAddressingMap::empty_buckets(self)
    }
}

impl<S: BuildHasher> Profiled for ChainingMap<String, (), S> {
    fn insert(&mut self, key: &str) {
        self.put(key.to_string(), ());
    }

    fn load_factor(&self) -> f64 {
        ChainingMap::load_factor(self)
    }

    fn empty_buckets(&self) -> usize {
        ChainingMap::empty_buckets(self)
    }
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    inserted: usize,
    load_factor: f64,
    empty_buckets: usize,
}

#[derive(Debug)]
struct Series {
    name: &'static str,
    samples: Vec<Sample>,
}

fn random_word(rng: &mut impl Rng) -> String {
    let length = rng.random_range(WORD_LENGTHS);
    (0..length).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

fn profile(name: &'static str, map: &mut impl Profiled, keys: &[String]) -> Series {
    let mut samples = Vec::with_capacity(keys.len() / STEP + 1);
    for (inserted, key) in keys.iter().enumerate() {
        map.insert(key);
        if (inserted + 1) % STEP == 0 {
            samples.push(Sample {
                inserted: inserted + 1,
                load_factor: map.load_factor(),
                empty_buckets: map.empty_buckets(),
            });
        }
    }
    if let Some(last) = samples.last() {
        info!(
            "{name}: load factor {:.3}, {} empty buckets after {} keys",
            last.load_factor, last.empty_buckets, last.inserted
        );
    }
    Series { name, samples }
}

fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[Series],
    value: impl Fn(&Sample) -> f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(50, 180, 50),  // Bright green
        RGBColor(180, 50, 180), // Bright magenta
    ];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_value = series
        .iter()
        .flat_map(|s| s.samples.iter())
        .map(&value)
        .fold(0.0, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..KEY_COUNT, 0.0..max_value)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (idx, s) in series.iter().enumerate() {
        let line_style = ShapeStyle::from(&colors[idx % colors.len()]).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                s.samples.iter().map(|sample| (sample.inserted, value(sample))),
                line_style,
            ))?
            .label(s.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;
    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut rng = rand::rng();
    let keys: Vec<String> = (0..KEY_COUNT).map(|_| random_word(&mut rng)).collect();
    info!("profiling {} random keys", keys.len());

    let series = vec![
        profile(
            "Open addressing, additive hash",
            &mut OpenAddressingMap::<String, (), _>::with_hasher(AdditiveState::default()),
            &keys,
        ),
        profile(
            "Open addressing, positional hash",
            &mut OpenAddressingMap::<String, (), _>::with_hasher(PositionalState::default()),
            &keys,
        ),
        profile(
            "Chaining, additive hash",
            &mut ChainingMap::<String, (), _>::with_hasher(AdditiveState::default()),
            &keys,
        ),
        profile(
            "Chaining, positional hash",
            &mut ChainingMap::<String, (), _>::with_hasher(PositionalState::default()),
            &keys,
        ),
    ];

    draw_chart(
        "load_factor.png",
        "Load Factor While Filling",
        "Load Factor (entries / buckets)",
        &series,
        |sample| sample.load_factor,
    )?;
    draw_chart(
        "empty_buckets.png",
        "Empty Buckets While Filling",
        "Empty Buckets",
        &series,
        |sample| sample.empty_buckets as f64,
    )?;

    println!("Generated plot images: load_factor.png, empty_buckets.png");

    Ok(())
}
