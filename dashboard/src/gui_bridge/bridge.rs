use crate::generator::profile::{build_example_catalog, GeneratorConfig};
use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::runner::{DashboardReport, Runner};
use anyhow::Context;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use shelfcore::CatalogError;
use std::{
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::hyper::body::Bytes;
use warp::reply::{Json, WithStatus};
use warp::{http::StatusCode, Filter, Rejection, Reply};

const MAX_UPLOAD_BYTES: u64 = 32 * 1024 * 1024;
const MAX_CONFIG_BYTES: u64 = 64 * 1024;

type SharedModel = Arc<RwLock<VisualizationModel>>;

#[derive(Debug, Default, Deserialize)]
struct IngestQuery {
    year: Option<i32>,
}

/// Bridge that hosts the dashboard HTTP endpoint and recomputes reports on upload.
pub struct GuiBridge {
    state: SharedModel,
    runner: Arc<Runner>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
            runner,
        }
    }

    pub fn routes(&self) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        let state = self.state.clone();
        let state_filter = warp::any().map(move || state.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("report")
            .and(warp::path::end())
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| {
                let guard = state.read().unwrap_or_else(PoisonError::into_inner);
                warp::reply::json(&*guard)
            });

        let ingest_route = warp::path("ingest")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::query::<IngestQuery>())
            .and(warp::body::content_length_limit(MAX_UPLOAD_BYTES))
            .and(warp::body::bytes())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |query: IngestQuery, body: Bytes, state: SharedModel, runner: Arc<Runner>| async move {
                    let contents = String::from_utf8_lossy(&body);
                    let outcome = runner
                        .load_str(&contents)
                        .map(|table| runner.execute(&table, query.year));
                    Ok::<_, Rejection>(respond(&state, outcome, "uploaded catalog"))
                },
            );

        let example_route = warp::path("ingest-example")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::query::<IngestQuery>())
            .and(warp::body::content_length_limit(MAX_CONFIG_BYTES))
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |query: IngestQuery,
                 config: GeneratorConfig,
                 state: SharedModel,
                 runner: Arc<Runner>| async move {
                    let outcome = build_example_catalog(&config)
                        .and_then(|contents| runner.load_str(&contents))
                        .map(|table| runner.execute(&table, query.year));
                    let source = config
                        .description
                        .unwrap_or_else(|| "example catalog".to_string());
                    Ok::<_, Rejection>(respond(&state, outcome, &source))
                },
            );

        get_route.or(ingest_route).or(example_route)
    }

    /// Binds `bind` and serves the routes on a background thread.
    ///
    /// Returns the bound address; fails if the address cannot be bound.
    pub fn serve(&self, bind: SocketAddr) -> anyhow::Result<SocketAddr> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building bridge runtime")?;
        let (addr, server) = {
            let _guard = runtime.enter();
            warp::serve(self.routes())
                .try_bind_ephemeral(bind)
                .with_context(|| format!("binding bridge to {}", bind))?
        };
        info!("bridge listening on http://{}", addr);
        thread::spawn(move || runtime.block_on(server));
        Ok(addr)
    }

    pub fn publish(&self, status: &str, report: &DashboardReport) {
        publish(&self.state, status, report.clone());
    }

    pub fn publish_status(&self, message: &str) {
        info!("[bridge] {}", message);
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        guard.status = message.to_string();
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn publish(state: &SharedModel, status: &str, report: DashboardReport) {
    info!(
        "[bridge] {}: {} rows, {} panels, year {:?}",
        status,
        report.summary.rows,
        report.panels.len(),
        report.year
    );
    let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
    *guard = VisualizationModel::ready(status, report);
}

fn respond(
    state: &SharedModel,
    outcome: anyhow::Result<DashboardReport>,
    source: &str,
) -> WithStatus<Json> {
    match outcome {
        Ok(report) => {
            let body = json!({
                "status": "ok",
                "rows": report.summary.rows,
                "year": report.year,
                "warnings": report.warnings.len(),
            });
            publish(state, &format!("{} ready", source), report);
            warp::reply::with_status(warp::reply::json(&body), StatusCode::OK)
        }
        Err(err) => {
            warn!("[bridge] {} rejected: {:#}", source, err);
            match err.downcast_ref::<CatalogError>() {
                Some(CatalogError::Schema { missing }) => warp::reply::with_status(
                    warp::reply::json(&json!({"status": "schema_error", "missing": missing})),
                    StatusCode::UNPROCESSABLE_ENTITY,
                ),
                _ => warp::reply::with_status(
                    warp::reply::json(&json!({"status": "error", "message": format!("{:#}", err)})),
                    StatusCode::BAD_REQUEST,
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::DashboardConfig;

    const CSV: &str = "Title,Author,My Rating,Date Added,Read Count\n\
        Dune,Frank Herbert,5,2022/03/04,1\n\
        Emma,Jane Austen,4,2023/01/09,0\n";

    fn bridge() -> GuiBridge {
        GuiBridge::new(Arc::new(Runner::new(DashboardConfig::default())))
    }

    #[test]
    fn gui_bridge_updates_state() {
        let gui = bridge();
        let runner = Runner::new(DashboardConfig::default());
        let table = runner.load_str(CSV).unwrap();
        let report = runner.execute(&table, None);
        gui.publish("offline", &report);
        let snapshot = gui.snapshot();
        assert_eq!(snapshot.status, "offline");
        assert_eq!(snapshot.report, Some(report));

        gui.publish_status("idle");
        assert_eq!(gui.snapshot().status, "idle");
        assert!(gui.snapshot().report.is_some());
    }

    #[tokio::test]
    async fn ingest_route_publishes_report() {
        let gui = bridge();
        let routes = gui.routes();
        let response = warp::test::request()
            .method("POST")
            .path("/ingest?year=2022")
            .body(CSV)
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["rows"], 2);
        assert_eq!(body["year"], 2022);

        let response = warp::test::request()
            .method("GET")
            .path("/report")
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let model: VisualizationModel = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(model.report.unwrap().summary.rows, 2);
    }

    #[tokio::test]
    async fn ingest_route_reports_schema_errors() {
        let gui = bridge();
        let response = warp::test::request()
            .method("POST")
            .path("/ingest")
            .body("sku,price\nA1,3\n")
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "schema_error");
        assert_eq!(body["missing"].as_array().unwrap().len(), 8);
        assert!(gui.snapshot().report.is_none());
    }

    #[test]
    fn serve_reports_bind_conflicts() {
        let held = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let taken = held.local_addr().unwrap();
        let err = bridge().serve(taken).unwrap_err();
        assert!(format!("{err:#}").contains("binding bridge"));

        let addr = bridge().serve(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn example_route_rejects_oversized_catalogs() {
        let gui = bridge();
        let response = warp::test::request()
            .method("POST")
            .path("/ingest-example")
            .json(&json!({"books": 1_000_000_000u64}))
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "error");
        assert!(gui.snapshot().report.is_none());
    }

    #[tokio::test]
    async fn example_route_limits_body_size() {
        let gui = bridge();
        let padding = "x".repeat(MAX_CONFIG_BYTES as usize + 1);
        let response = warp::test::request()
            .method("POST")
            .path("/ingest-example")
            .json(&json!({"books": 5, "description": padding}))
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(gui.snapshot().report.is_none());
    }

    #[tokio::test]
    async fn example_route_generates_catalog() {
        let gui = bridge();
        let response = warp::test::request()
            .method("POST")
            .path("/ingest-example")
            .json(&json!({"books": 25, "seed": 3, "description": "demo"}))
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = gui.snapshot();
        assert_eq!(snapshot.status, "demo ready");
        assert_eq!(snapshot.report.unwrap().summary.rows, 25);
    }
}
