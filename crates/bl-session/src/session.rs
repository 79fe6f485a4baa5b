//! The analysis session.

use rustc_hash::FxHashMap;

use bl_core::{AnalysisConfig, GeoPoint, NodeId};
use bl_netsim::{DelaySampler, LossTimeline, NetworkMetrics, derive_metrics, inject_reconfiguration_loss};
use bl_obstacle::{
    AttributeDataset, Obstacle, ObstacleMatch, ObstacleQuery, ObstacleResponse, ObstacleResult, ObstructionTable,
    aggregate_obstructions, match_obstacles, speed_limit_tags,
};
use bl_output::{NodeRecord, RouteDataExport, node_records};
use bl_route::{NodeTable, RouteRequest, RouteResponse, RouteResult, SpeedLimitTags, flatten_route, reconcile_speeds};

use crate::{AttributeProvider, GeometryProvider, LookupTicket, RouteProvider, SessionError, SessionResult, StageStatus};

/// A resolved route.
#[derive(Debug)]
pub struct RouteStage {
    pub request: RouteRequest,
    /// Speeds are capped at the configured maximum; once the obstacle stage
    /// is ready they also carry the mapped speed limits.
    pub table:   NodeTable,
}

/// Obstacles matched against the current route.
#[derive(Debug)]
pub struct ObstacleStage {
    pub speed_limits: SpeedLimitTags,
    /// Bridges and tunnels, tunnels first.
    pub matches:      Vec<ObstacleMatch>,
    pub obstructions: ObstructionTable,
}

/// One analysis: a route, the obstacles along it, and everything derived.
///
/// All derived state is rebuilt from scratch on every route lookup.
pub struct Session<R, G, A> {
    config:     AnalysisConfig,
    routes:     R,
    geometry:   G,
    attributes: A,
    generation: u64,
    route:      StageStatus<RouteStage>,
    obstacles:  StageStatus<ObstacleStage>,
}

impl<R, G, A> Session<R, G, A>
where
    R: RouteProvider,
    G: GeometryProvider,
    A: AttributeProvider,
{
    pub fn new(config: AnalysisConfig, routes: R, geometry: G, attributes: A) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            routes,
            geometry,
            attributes,
            generation: 0,
            route: StageStatus::Idle,
            obstacles: StageStatus::Idle,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn route_status(&self) -> &StageStatus<RouteStage> {
        &self.route
    }

    pub fn obstacle_status(&self) -> &StageStatus<ObstacleStage> {
        &self.obstacles
    }

    /// Ticket of the most recent route lookup.
    pub fn current_ticket(&self) -> LookupTicket {
        LookupTicket(self.generation)
    }

    fn is_current(&self, ticket: LookupTicket, what: &str) -> bool {
        if ticket.0 == self.generation {
            return true;
        }
        log::warn!("discarding stale {what} result from {ticket}; current is {}", self.current_ticket());
        false
    }

    // ── Route stage ───────────────────────────────────────────────────────

    /// Start a new lookup.  Discards every derived table and invalidates all
    /// earlier tickets.
    pub fn begin_route_lookup(&mut self) -> LookupTicket {
        self.generation += 1;
        self.route = StageStatus::Computing;
        self.obstacles = StageStatus::Idle;
        log::debug!("started {}", self.current_ticket());
        self.current_ticket()
    }

    /// Deliver a routing response.  Returns `Ok(false)` if `ticket` is stale
    /// and the result was dropped.
    pub fn complete_route(
        &mut self,
        ticket: LookupTicket,
        request: RouteRequest,
        response: RouteResult<RouteResponse>,
    ) -> SessionResult<bool> {
        if !self.is_current(ticket, "route") {
            return Ok(false);
        }
        match self.build_route_stage(request, response) {
            Ok(stage) => {
                log::info!("route resolved: {} nodes, {:.1} s", stage.table.len(), stage.table.total_elapsed_secs());
                self.route = StageStatus::Ready(stage);
                Ok(true)
            }
            Err(e) => {
                log::error!("route lookup failed: {e}");
                self.route = StageStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn build_route_stage(&self, request: RouteRequest, response: RouteResult<RouteResponse>) -> SessionResult<RouteStage> {
        let route = response?.into_first_route()?;
        let mut table = flatten_route(&route);
        reconcile_speeds(&mut table, &SpeedLimitTags::new(), &self.config)?;
        Ok(RouteStage { request, table })
    }

    /// Look up the route from `start` to `end` and flatten it.
    pub fn lookup_route(&mut self, start: GeoPoint, end: GeoPoint) -> SessionResult<()> {
        let ticket = self.begin_route_lookup();
        let request = RouteRequest::from_config(start, end, &self.config);
        log::debug!("routing request: {}", request.url(&self.config.routing_host));
        let response = self.routes.fetch_route(&request);
        self.complete_route(ticket, request, response).map(|_| ())
    }

    // ── Obstacle stage ────────────────────────────────────────────────────

    /// Mark the obstacle stage as computing and build its query.  Needs a
    /// resolved route.
    pub fn begin_obstacle_lookup(&mut self) -> SessionResult<(LookupTicket, ObstacleQuery)> {
        let stage = self.route.ready().ok_or(SessionError::RouteNotReady)?;
        let query = ObstacleQuery::from_route_nodes(stage.table.ids(), self.config.overpass_timeout_secs);
        self.obstacles = StageStatus::Computing;
        Ok((self.current_ticket(), query))
    }

    /// Run the geometry query and the attribute lookup, concurrently with
    /// the `parallel` feature.  Both always run to completion.
    pub fn fetch_obstacle_inputs(
        &self,
        query: &ObstacleQuery,
    ) -> (ObstacleResult<ObstacleResponse>, ObstacleResult<AttributeDataset>) {
        #[cfg(feature = "parallel")]
        {
            rayon::join(|| self.geometry.fetch_obstacles(query), || self.attributes.load_attributes())
        }

        #[cfg(not(feature = "parallel"))]
        {
            (self.geometry.fetch_obstacles(query), self.attributes.load_attributes())
        }
    }

    /// Deliver both obstacle inputs.  If either failed, the stage fails and
    /// the route is kept.  Returns `Ok(false)` for a stale ticket.
    pub fn complete_obstacles(
        &mut self,
        ticket: LookupTicket,
        geometry: ObstacleResult<ObstacleResponse>,
        attributes: ObstacleResult<AttributeDataset>,
    ) -> SessionResult<bool> {
        if !self.is_current(ticket, "obstacle") {
            return Ok(false);
        }
        match self.build_obstacle_stage(geometry, attributes) {
            Ok(stage) => {
                log::info!(
                    "matched {} obstacle(s); {:.2} s obstructed",
                    stage.matches.len(),
                    stage.obstructions.total_time_secs()
                );
                self.obstacles = StageStatus::Ready(stage);
                Ok(true)
            }
            Err(e) => {
                log::error!("obstacle lookup failed: {e}");
                self.obstacles = StageStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn build_obstacle_stage(
        &mut self,
        geometry: ObstacleResult<ObstacleResponse>,
        attributes: ObstacleResult<AttributeDataset>,
    ) -> SessionResult<ObstacleStage> {
        let response = geometry?;
        let dataset = attributes?;
        let route = self.route.ready_mut().ok_or(SessionError::RouteNotReady)?;

        let speed_limits = speed_limit_tags(&response.route_ways, &route.table);
        reconcile_speeds(&mut route.table, &speed_limits, &self.config)?;

        let obstacles = Obstacle::collect(&response, &dataset);
        let matches = match_obstacles(&route.table, &obstacles);
        let obstructions = aggregate_obstructions(&route.table, &matches);
        Ok(ObstacleStage { speed_limits, matches, obstructions })
    }

    /// Query and match the obstacles along the resolved route.
    pub fn lookup_obstacles(&mut self) -> SessionResult<()> {
        let (ticket, query) = self.begin_obstacle_lookup()?;
        log::debug!("obstacle query:\n{}", query.render());
        let (geometry, attributes) = self.fetch_obstacle_inputs(&query);
        self.complete_obstacles(ticket, geometry, attributes).map(|_| ())
    }

    // ── Adjustments ───────────────────────────────────────────────────────

    /// Change the speed cap and re-derive speeds and obstruction from the
    /// routed speeds.
    pub fn set_max_speed(&mut self, kmh: f64) -> SessionResult<()> {
        if kmh.is_nan() || kmh <= 0.0 {
            return Err(SessionError::Config(format!("max speed must be positive, got {kmh}")));
        }
        self.config.max_speed_kmh = kmh;

        let Some(route) = self.route.ready_mut() else {
            return Ok(());
        };
        let no_limits = SpeedLimitTags::new();
        let limits = self.obstacles.ready().map_or(&no_limits, |o| &o.speed_limits);
        reconcile_speeds(&mut route.table, limits, &self.config)?;

        if let Some(stage) = self.obstacles.ready_mut() {
            stage.obstructions = aggregate_obstructions(&route.table, &stage.matches);
        }
        Ok(())
    }

    // ── Outputs ───────────────────────────────────────────────────────────

    pub fn route_table(&self) -> Option<&NodeTable> {
        self.route.ready().map(|r| &r.table)
    }

    fn analysed(&self) -> Option<(&RouteStage, &ObstacleStage)> {
        Some((self.route.ready()?, self.obstacles.ready()?))
    }

    /// True once both stages are ready.
    pub fn exports_ready(&self) -> bool {
        self.analysed().is_some()
    }

    pub fn metrics(&self) -> Option<FxHashMap<NodeId, NetworkMetrics>> {
        self.obstacles.ready().map(|o| derive_metrics(&o.obstructions))
    }

    pub fn node_records(&self) -> Option<Vec<NodeRecord>> {
        let (route, obstacles) = self.analysed()?;
        Some(node_records(&route.table, &obstacles.obstructions, &derive_metrics(&obstacles.obstructions)))
    }

    pub fn loss_timeline<S: DelaySampler + ?Sized>(&self, sampler: &mut S) -> Option<LossTimeline> {
        let (route, obstacles) = self.analysed()?;
        Some(inject_reconfiguration_loss(
            &route.table,
            &obstacles.obstructions,
            self.config.reconfig_interval_secs,
            sampler,
        ))
    }

    pub fn route_export(&self) -> Option<RouteDataExport> {
        let (_, obstacles) = self.analysed()?;
        Some(RouteDataExport::new(self.node_records()?, &obstacles.matches))
    }
}
