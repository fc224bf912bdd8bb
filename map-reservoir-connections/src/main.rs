//! California Reservoir Connections Map
//!
//! Draws California counties with reservoir markers on top. Hovering a
//! reservoir highlights the reservoirs it is connected to, sized by
//! connection weight; clicking pins that selection. Hovering a county
//! highlights the reservoirs that county draws from.
//!
//! Data flow:
//! 1. The connection tables are embedded in `cwr-map` (`fixtures/connections.json`).
//! 2. On mount, `ca_counties.geojson` is fetched and the county layer drawn.
//! 3. Only then is `reservoir_data.json` fetched and the marker layer drawn.
//! 4. A failed step is logged and shown; the layers drawn so far stay up.

use cwr_geo::county::CountyFeature;
use cwr_geo::reservoir::ReservoirRecord;
use cwr_map::connections::Connections;
use cwr_map::controller::InteractionController;
use cwr_map_ui::components::{LoadStatus, MapCanvas, MapHeader, TooltipPanel};
use cwr_map_ui::fetch::fetch_text;
use cwr_map_ui::state::AppState;
use cwr_utils::error::{Layer, LoadError};
use dioxus::prelude::*;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("reservoir-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    use_future(move || async move {
        if let Err(e) = load_map(state).await {
            report_failure(state, e);
        }
    });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            MapHeader {
                title: "California Reservoir Connections".to_string(),
                subtitle: "Hover a reservoir or county to see its connections. Click a reservoir to pin them.".to_string(),
            }

            LoadStatus {}

            div {
                style: "max-width: 1000px;",
                MapCanvas {}
            }

            TooltipPanel {}
        }
    }
}

/// Load both layers in order, drawing each as soon as it's parsed.
async fn load_map(mut state: AppState) -> anyhow::Result<()> {
    let config = (*state.config.peek()).clone();
    let connections =
        Connections::embedded().map_err(|e| LoadError::new(Layer::Connections, format!("{:#}", e)))?;
    let mut controller = InteractionController::new(config.clone(), connections);

    let counties = fetch_text(&config.counties_url)
        .await
        .and_then(|text| CountyFeature::parse_feature_collection(&text))
        .map_err(|e| LoadError::new(Layer::Counties, format!("{:#}", e)))?;
    controller.draw_counties(&counties);
    state.controller.set(Some(controller));
    state.publish_scene();

    let reservoirs = fetch_text(&config.reservoirs_url)
        .await
        .and_then(|text| ReservoirRecord::parse_reservoir_json(&text))
        .map_err(|e| LoadError::new(Layer::Reservoirs, format!("{:#}", e)))?;
    if let Some(controller) = state.controller.write().as_mut() {
        controller.draw_reservoirs(&reservoirs);
    }
    state.publish_scene();

    log::info!(
        "Map ready: {} counties, {} reservoirs",
        counties.len(),
        reservoirs.len()
    );
    state.loading.set(false);
    Ok(())
}

fn report_failure(mut state: AppState, err: anyhow::Error) {
    log::error!("{:#}", err);
    state.error_msg.set(Some(err.to_string()));
    state.loading.set(false);
}
