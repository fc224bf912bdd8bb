//! Hand-authored connection tables.
//!
//! Two lookups drive highlighting:
//! - the weighted adjacency table, reservoir -> {neighbor: weight in [0, 1]}
//! - the county table, county name -> reservoirs it draws from (unweighted)
//!
//! Both are built once at startup and passed to the controller by
//! reference. Missing keys are "no connections", never an error.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Embedded connection tables shipped with the map.
pub static CONNECTIONS_JSON: &str = include_str!("../../fixtures/connections.json");

/// reservoir id -> neighbor id -> edge weight
pub type AdjacencyTable = BTreeMap<String, BTreeMap<String, f64>>;

/// county name -> connected reservoir ids
pub type CountyConnections = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connections {
    #[serde(default)]
    pub reservoirs: AdjacencyTable,
    #[serde(default)]
    pub counties: CountyConnections,
}

impl Connections {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let connections: Connections =
            serde_json::from_str(json).context("invalid connection tables")?;
        log::info!(
            "Loaded connections for {} reservoirs and {} counties",
            connections.reservoirs.len(),
            connections.counties.len()
        );
        Ok(connections)
    }

    /// The tables compiled into the binary.
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(CONNECTIONS_JSON)
    }

    /// Neighbors of a reservoir with their edge weights.
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.reservoirs
            .get(id)
            .into_iter()
            .flat_map(|n| n.iter().map(|(k, w)| (k.as_str(), *w)))
    }

    /// Weight of the edge `from -> to`, if the table has one.
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.reservoirs.get(from)?.get(to).copied()
    }

    /// Reservoirs that key the adjacency table get the "important" marker class.
    pub fn is_important(&self, id: &str) -> bool {
        self.reservoirs.contains_key(id)
    }

    /// Reservoirs connected to a county, by county name ("Los Angeles").
    pub fn county_reservoirs(&self, county_name: &str) -> &[String] {
        self.counties
            .get(county_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
