use anyhow::Context;
use csv::ReaderBuilder;
use cwr_utils::measurements::parse_measurement;
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

/// A reservoir marker record as published in `reservoir_data.json`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ReservoirRecord {
    /// CDEC station identifier, e.g. "SHA" for Shasta.
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "LakeName")]
    pub lake_name: String,
    #[serde(rename = "Latitude", deserialize_with = "coordinate")]
    pub latitude: f64,
    #[serde(rename = "Longitude", deserialize_with = "coordinate")]
    pub longitude: f64,
    /// Elevation in feet
    #[serde(rename = "Elevation", default, deserialize_with = "measurement")]
    pub elevation: Option<f64>,
    /// Capacity in acre-feet (AF)
    #[serde(rename = "Capacity", default, deserialize_with = "measurement")]
    pub capacity: Option<f64>,
}

/// Numeric fields show up both as JSON numbers and as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(v) => Ok(v),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid coordinate {:?}: {}", s, e))),
    }
}

fn measurement<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(v)) => Some(v),
        Some(NumberOrText::Text(s)) => parse_measurement(&s),
        None => None,
    })
}

impl ReservoirRecord {
    /// Identifier of the reservoir's map element (the station name, whitespace removed).
    pub fn element_id(&self) -> String {
        cwr_utils::ids::element_id(&self.name)
    }

    /// Parse the reservoir JSON: an array of objects with `Name`, `LakeName`,
    /// `Latitude`, `Longitude`, `Elevation` and `Capacity`.
    pub fn parse_reservoir_json(json: &str) -> anyhow::Result<Vec<ReservoirRecord>> {
        let reservoirs: Vec<ReservoirRecord> =
            serde_json::from_str(json).context("reservoir data is not a valid record array")?;
        log::info!("Loaded {} reservoir records", reservoirs.len());
        Ok(reservoirs)
    }

    /// Parse reservoir records from CSV.
    ///
    /// Expected header: `Name,LakeName,Latitude,Longitude,Elevation,Capacity`
    /// (column order may vary). Rows without a name or with unparseable
    /// coordinates are skipped.
    pub fn parse_reservoir_csv(csv_data: &str) -> anyhow::Result<Vec<ReservoirRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let headers = rdr.headers()?.clone();
        let column = |name: &str| -> anyhow::Result<usize> {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .with_context(|| format!("reservoir CSV is missing the {} column", name))
        };
        let name_col = column("Name")?;
        let lake_col = column("LakeName")?;
        let lat_col = column("Latitude")?;
        let lon_col = column("Longitude")?;
        let elevation_col = column("Elevation").ok();
        let capacity_col = column("Capacity").ok();

        let mut reservoirs = Vec::new();
        let mut skipped = 0u32;
        for row in rdr.records() {
            let r = row?;
            let name = r.get(name_col).unwrap_or("").trim();
            let latitude = r.get(lat_col).and_then(|s| s.trim().parse::<f64>().ok());
            let longitude = r.get(lon_col).and_then(|s| s.trim().parse::<f64>().ok());
            let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
                skipped += 1;
                continue;
            };
            if name.is_empty() {
                skipped += 1;
                continue;
            }
            let field = |col: Option<usize>| col.and_then(|c| r.get(c)).and_then(parse_measurement);
            reservoirs.push(ReservoirRecord {
                name: name.to_string(),
                lake_name: r.get(lake_col).unwrap_or("").trim().to_string(),
                latitude,
                longitude,
                elevation: field(elevation_col),
                capacity: field(capacity_col),
            });
        }
        log::info!(
            "Loaded {} reservoir records from CSV, skipped {}",
            reservoirs.len(),
            skipped
        );
        Ok(reservoirs)
    }
}
