use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;

/// Spacing between consecutive survey stations, in metres.
const STEP: f64 = 100.0;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_profile(
    distances: &[f64],
    base: f64,
    grade: f64,
    hills: &[(f64, f64, f64)],
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    distances
        .iter()
        .map(|&d| {
            let relief: f64 = hills
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(d, mu, sigma, amp))
                .sum();
            base + grade * d + relief + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (name, length, base elevation, grade, noise, hills as (centre, width, height))
    let roads: Vec<(&str, f64, f64, f64, f64, Vec<(f64, f64, f64)>)> = vec![
        (
            "Coastal Highway",
            8_000.0,
            4.0,
            0.0005,
            0.3,
            vec![(2_000.0, 600.0, 35.0), (5_500.0, 900.0, 22.0)],
        ),
        (
            "Mountain Pass",
            12_000.0,
            740.0,
            0.012,
            0.8,
            vec![(6_000.0, 2_200.0, 180.0), (9_500.0, 700.0, 60.0)],
        ),
        (
            "Valley Road",
            6_000.0,
            115.0,
            -0.002,
            0.2,
            vec![(1_500.0, 500.0, 12.0), (4_200.0, 800.0, 18.0)],
        ),
        (
            "Ridge Line Track",
            9_000.0,
            420.0,
            0.003,
            0.5,
            vec![(2_500.0, 1_000.0, 45.0), (7_000.0, 1_400.0, 70.0)],
        ),
    ];

    // Collect all rows, one row per survey station
    let mut all_road: Vec<String> = Vec::new();
    let mut all_distance: Vec<f64> = Vec::new();
    let mut all_elevation: Vec<f64> = Vec::new();

    for (name, length, base, grade, noise, hills) in &roads {
        let stations = (*length / STEP) as usize;
        let distances: Vec<f64> = (0..=stations).map(|i| i as f64 * STEP).collect();
        let elevations = generate_profile(&distances, *base, *grade, hills, *noise, &mut rng);

        for (&d, &e) in distances.iter().zip(&elevations) {
            all_road.push(name.to_string());
            all_distance.push(d);
            all_elevation.push(e);
        }
    }

    // Build Arrow arrays
    let road_array = StringArray::from(
        all_road.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    );
    let distance_array = Float64Array::from(all_distance.clone());
    let elevation_array = Float64Array::from(all_elevation.clone());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Road Name", DataType::Utf8, false),
        Field::new("Distance (m)", DataType::Float64, false),
        Field::new("Elevation (m)", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(road_array),
            Arc::new(distance_array),
            Arc::new(elevation_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_roads.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    // Write the same rows as CSV, plus a few rows a spreadsheet export tends
    // to contain. The loader drops these.
    let csv_path = "sample_roads.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    csv_writer
        .write_record(["Road Name", "Distance (m)", "Elevation (m)"])
        .expect("Failed to write CSV header");
    for i in 0..all_road.len() {
        let distance = format!("{:.1}", all_distance[i]);
        let elevation = format!("{:.2}", all_elevation[i]);
        csv_writer
            .write_record([all_road[i].as_str(), distance.as_str(), elevation.as_str()])
            .expect("Failed to write CSV row");
    }
    for dirty in [
        ["", "150.0", "18.40"],
        ["Coastal Highway", "n/a", "12.10"],
        ["Mountain Pass", "4350.0", ""],
    ] {
        csv_writer
            .write_record(dirty)
            .expect("Failed to write CSV row");
    }
    csv_writer.flush().expect("Failed to flush CSV file");

    print_batches(&[batch.slice(0, 5)]).expect("Failed to print preview");
    println!(
        "Wrote {} samples across {} roads to {parquet_path} and {csv_path}",
        all_distance.len(),
        roads.len()
    );
}
