use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

/// UK extent the viewer stretches the map over.
const LON_RANGE: (f64, f64) = (-10.592, 1.6848);
const LAT_RANGE: (f64, f64) = (50.681, 57.985);

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Sensor table with the coordinate labels swapped, as in the real export.
fn write_csv(path: &str, rng: &mut SimpleRng, rows: usize) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Serial",
        "Latitude",
        "Longitude",
        "SensorType",
        "BeginTime",
        "EndTime",
        "Code",
    ])?;

    let sensor_types = ["Soil", "Air", "Light", ""];
    let suffixes = ["", "-extra", " (old)", "/2"];
    let mut inside = 0;

    for i in 0..rows {
        // One in five sensors lands outside the UK box.
        let (lon, lat) = if i % 5 == 4 {
            (rng.range(-30.0, 30.0), rng.range(30.0, 70.0))
        } else {
            (rng.range(LON_RANGE.0, LON_RANGE.1), rng.range(LAT_RANGE.0, LAT_RANGE.1))
        };
        let (lon, lat) = (format!("{lon:.6}"), format!("{lat:.6}"));
        if (LON_RANGE.0..=LON_RANGE.1).contains(&lon.parse::<f64>()?)
            && (LAT_RANGE.0..=LAT_RANGE.1).contains(&lat.parse::<f64>()?)
        {
            inside += 1;
        }

        let serial = if i % 17 == 0 {
            format!("unregistered-{i}")
        } else {
            format!("PI{:06}{}{}", 40000 + i, rng.pick(&["A", "B", "C"]), rng.pick(&suffixes))
        };
        let year = 2016 + (i % 5);
        let begin = format!("{year}-{:02}-01 00:00:00", 1 + i % 12);
        let end = if i % 3 == 0 { String::new() } else { format!("{}-01-01 00:00:00", year + 1) };

        writer.write_record([
            serial,
            lon,
            lat,
            rng.pick(&sensor_types).to_string(),
            begin,
            end,
            format!("C{i}"),
        ])?;
    }
    writer.flush()?;
    Ok(inside)
}

/// Flat sea-and-land placeholder map.
fn write_map(path: &str) -> Result<()> {
    let (w, h) = (600u32, 700u32);
    let image = RgbaImage::from_fn(w, h, |x, y| {
        let dx = x as f64 / w as f64 - 0.62;
        let dy = y as f64 / h as f64 - 0.55;
        if dx * dx * 4.0 + dy * dy * 1.6 < 0.09 {
            Rgba([196, 214, 170, 255])
        } else {
            Rgba([170, 205, 235, 255])
        }
    });
    image.save(path).with_context(|| format!("writing {path}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = 250;

    let inside = write_csv("GrowLocations.csv", &mut rng, rows)?;
    write_map("map7.png")?;

    println!(
        "Wrote {rows} sensors ({inside} inside the UK box) to GrowLocations.csv \
         and a placeholder map7.png"
    );
    Ok(())
}
