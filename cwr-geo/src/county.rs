use anyhow::Context;
use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use log::{info, warn};
use std::str::FromStr;

/// A California county boundary as read from the county GeoJSON.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyFeature {
    /// County name from `properties.NAME`, e.g. "Los Angeles".
    pub name: String,
    /// Boundary in longitude/latitude degrees.
    pub boundary: MultiPolygon<f64>,
}

impl CountyFeature {
    /// Identifier of the county's map element ("Los Angeles" -> "LosAngeles").
    pub fn element_id(&self) -> String {
        cwr_utils::ids::element_id(&self.name)
    }

    /// Parse a GeoJSON feature collection of county boundaries.
    ///
    /// Every feature needs a string `properties.NAME` and a Polygon or
    /// MultiPolygon geometry. Features missing either are skipped with a
    /// warning; malformed GeoJSON is an error.
    pub fn parse_feature_collection(geojson_str: &str) -> anyhow::Result<Vec<CountyFeature>> {
        let geojson = GeoJson::from_str(geojson_str).context("county data is not valid GeoJSON")?;
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => anyhow::bail!("county data is not a GeoJSON FeatureCollection"),
        };

        let mut counties = Vec::with_capacity(collection.features.len());
        let mut skipped = 0u32;
        for feature in collection.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.get("NAME"))
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let Some(name) = name else {
                warn!("Skipping county feature without a NAME property");
                skipped += 1;
                continue;
            };
            let Some(geometry) = feature.geometry else {
                warn!("Skipping county {} without geometry", name);
                skipped += 1;
                continue;
            };
            let geom: Geometry<f64> = geometry
                .value
                .try_into()
                .with_context(|| format!("invalid geometry for county {}", name))?;
            let boundary = match geom {
                Geometry::Polygon(p) => MultiPolygon(vec![p]),
                Geometry::MultiPolygon(mp) => mp,
                _ => {
                    warn!("Skipping county {}: geometry is not polygonal", name);
                    skipped += 1;
                    continue;
                }
            };
            counties.push(CountyFeature { name, boundary });
        }
        info!(
            "Loaded {} county boundaries, skipped {}",
            counties.len(),
            skipped
        );
        Ok(counties)
    }
}
