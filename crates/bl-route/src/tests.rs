//! Unit tests for bl-route.
//!
//! Routes are built by hand; no routing service is contacted.

#[cfg(test)]
pub(crate) mod helpers {
    use bl_core::NodeId;

    use crate::wire::{Annotation, Route, RouteLeg, RouteStep, StepGeometry};

    pub fn step(coords: &[[f64; 2]]) -> RouteStep {
        RouteStep {
            geometry: StepGeometry { coordinates: coords.to_vec() },
            name:     String::new(),
        }
    }

    /// One leg with a single step.  `coords` are `[lon, lat]`; edge arrays
    /// must be one shorter than `nodes`.
    pub fn leg(coords: &[[f64; 2]], nodes: &[u64], distance: &[f64], duration: &[f64], speed_mps: &[f64]) -> RouteLeg {
        RouteLeg {
            steps:      vec![step(coords)],
            annotation: Some(Annotation {
                distance: distance.to_vec(),
                duration: duration.to_vec(),
                speed:    speed_mps.to_vec(),
                nodes:    nodes.iter().copied().map(NodeId).collect(),
            }),
        }
    }

    pub fn route(legs: Vec<RouteLeg>) -> Route {
        Route { distance: 0.0, duration: 0.0, legs }
    }

    /// Three nodes along the equator: segments [0, 100, 100] m at 72 km/h
    /// (20 m/s), so 5 s per segment.
    pub fn three_node_route() -> Route {
        route(vec![leg(
            &[[0.0, 0.0], [0.0009, 0.0], [0.0018, 0.0]],
            &[1, 2, 3],
            &[100.0, 100.0],
            &[5.0, 5.0],
            &[20.0, 20.0],
        )])
    }
}

// ── Wire format & request ─────────────────────────────────────────────────────

#[cfg(test)]
mod wire {
    use bl_core::{GeoPoint, NodeId};

    use crate::{RouteError, RouteRequest, RouteResponse, flatten_route};

    const RESPONSE: &str = r#"{
        "code": "Ok",
        "routes": [{
            "distance": 200.0,
            "duration": 10.0,
            "weight": 10.0,
            "legs": [{
                "steps": [
                    { "geometry": { "type": "LineString", "coordinates": [[8.0, 52.0], [8.001, 52.0]] }, "name": "A" },
                    { "geometry": { "type": "LineString", "coordinates": [[8.001, 52.0], [8.002, 52.0]] }, "name": "B" }
                ],
                "annotation": {
                    "distance": [68.5, 68.5],
                    "duration": [5.0, 5.0],
                    "speed": [13.7, 13.7],
                    "nodes": [101, 102, 103],
                    "datasources": [0, 0]
                }
            }]
        }]
    }"#;

    #[test]
    fn parses_and_flattens_service_json() {
        let route = RouteResponse::from_json_reader(RESPONSE.as_bytes())
            .unwrap()
            .into_first_route()
            .unwrap();
        let table = flatten_route(&route);
        assert_eq!(table.len(), 3);
        assert_eq!(table.nodes()[2].id, NodeId(103));
        assert_eq!(table.nodes()[1].coordinates, GeoPoint::new(52.0, 8.001));
    }

    #[test]
    fn error_code_is_reported() {
        let json = r#"{ "code": "NoRoute", "message": "Impossible route" }"#;
        let err = RouteResponse::from_json_reader(json.as_bytes())
            .unwrap()
            .into_first_route()
            .unwrap_err();
        assert!(matches!(err, RouteError::Service { ref code, .. } if code == "NoRoute"));
    }

    #[test]
    fn ok_without_routes_is_no_route() {
        let json = r#"{ "code": "Ok", "routes": [] }"#;
        let err = RouteResponse::from_json_reader(json.as_bytes())
            .unwrap()
            .into_first_route()
            .unwrap_err();
        assert!(matches!(err, RouteError::NoRoute));
    }

    #[test]
    fn request_url_is_lon_first() {
        let req = RouteRequest::new(GeoPoint::new(52.27, 8.04), GeoPoint::new(52.31, 8.12), "car");
        assert_eq!(
            req.url("https://router.example.org/"),
            "https://router.example.org/route/v1/car/8.04,52.27;8.12,52.31\
             ?steps=true&annotations=true&geometries=geojson&overview=full"
        );
    }
}

// ── Flattening ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod flatten {
    use approx::assert_abs_diff_eq;

    use bl_core::NodeId;

    use super::helpers::{leg, route, step, three_node_route};
    use crate::flatten_route;
    use crate::wire::RouteLeg;

    #[test]
    fn two_legs_share_boundary_coordinate() {
        let r = route(vec![
            leg(&[[0.0, 0.0], [0.1, 0.0], [0.2, 0.0]], &[1, 2, 3], &[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0]),
            leg(
                &[[0.2, 0.0], [0.3, 0.0], [0.4, 0.0], [0.5, 0.0]],
                &[3, 4, 5, 6],
                &[1.0, 1.0, 1.0],
                &[1.0, 1.0, 1.0],
                &[1.0, 1.0, 1.0],
            ),
        ]);
        let table = flatten_route(&r);
        assert_eq!(table.len(), 6);
        let ids: Vec<_> = table.ids().collect();
        assert_eq!(ids, (1..=6).map(NodeId).collect::<Vec<_>>());
        // No duplicate boundary point.
        let lons: Vec<f64> = table.iter().map(|n| n.coordinates.lon).collect();
        assert_eq!(lons, [0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);
    }

    #[test]
    fn steps_within_a_leg_share_boundaries() {
        let mut l = leg(&[[0.0, 0.0], [0.1, 0.0]], &[1, 2, 3], &[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0]);
        l.steps.push(step(&[[0.1, 0.0], [0.2, 0.0]]));
        let table = flatten_route(&route(vec![l]));
        assert_eq!(table.len(), 3);
        assert_eq!(table.nodes()[2].coordinates.lon, 0.2);
    }

    #[test]
    fn per_node_alignment() {
        let table = flatten_route(&three_node_route());
        let n = table.nodes();
        assert_eq!(n[0].speed_kmh, 0.0);
        assert_eq!(n[0].segment_length_m, 0.0);
        assert_eq!(n[0].distance_along_route_m, 0.0);
        assert_eq!(n[0].elapsed_secs, 0.0);

        assert_abs_diff_eq!(n[1].speed_kmh, 72.0, epsilon = 1e-9);
        assert_eq!(n[1].segment_length_m, 100.0);
        assert_eq!(n[2].distance_along_route_m, 200.0);
        assert_eq!(n[2].elapsed_secs, 10.0);
        assert_eq!(table.total_elapsed_secs(), 10.0);
    }

    #[test]
    fn cumulative_distance_is_monotone() {
        let r = route(vec![leg(
            &[[0.0, 0.0], [0.1, 0.0], [0.2, 0.0], [0.3, 0.0], [0.4, 0.0]],
            &[10, 11, 12, 13, 14],
            &[5.0, 0.0, 12.5, 3.0],
            &[1.0, 0.0, 2.0, 1.0],
            &[5.0, 0.0, 6.25, 3.0],
        )]);
        let table = flatten_route(&r);
        let d: Vec<f64> = table.iter().map(|n| n.distance_along_route_m).collect();
        assert_eq!(d[0], 0.0);
        assert!(d.windows(2).all(|w| w[0] <= w[1]), "{d:?}");
    }

    #[test]
    fn missing_annotations_give_empty_table() {
        let r = route(vec![RouteLeg { steps: vec![step(&[[0.0, 0.0], [1.0, 1.0]])], annotation: None }]);
        assert!(flatten_route(&r).is_empty());
        assert!(flatten_route(&route(vec![])).is_empty());
    }

    #[test]
    fn nodes_without_coordinates_are_skipped() {
        // Four node ids but only three coordinates.
        let r = route(vec![leg(
            &[[0.0, 0.0], [0.1, 0.0], [0.2, 0.0]],
            &[1, 2, 3, 4],
            &[1.0, 1.0, 1.0],
            &[1.0, 1.0, 1.0],
            &[1.0, 1.0, 1.0],
        )]);
        let table = flatten_route(&r);
        assert_eq!(table.len(), 3);
        assert!(!table.contains(NodeId(4)));
    }
}

// ── Node table ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use bl_core::{GeoPoint, NodeId};

    use crate::{NodeTable, RouteNode};

    fn node(id: u64, dist: f64) -> RouteNode {
        RouteNode {
            id:                     NodeId(id),
            coordinates:            GeoPoint::new(0.0, dist),
            route_speed_kmh:        50.0,
            speed_kmh:              50.0,
            distance_along_route_m: dist,
            segment_length_m:       10.0,
            elapsed_secs:           dist / 10.0,
        }
    }

    #[test]
    fn lookup_by_id_keeps_traversal_order() {
        let t = NodeTable::from_nodes(vec![node(30, 0.0), node(10, 10.0), node(20, 20.0)]);
        let ids: Vec<_> = t.ids().collect();
        assert_eq!(ids, [NodeId(30), NodeId(10), NodeId(20)]);
        assert_eq!(t.position(NodeId(10)), Some(1));
        assert_eq!(t.get(NodeId(20)).unwrap().distance_along_route_m, 20.0);
        assert!(t.get(NodeId(99)).is_none());
    }

    #[test]
    fn revisited_node_keeps_last_position() {
        let t = NodeTable::from_nodes(vec![node(1, 0.0), node(2, 10.0), node(1, 20.0), node(3, 30.0)]);
        assert_eq!(t.len(), 3);
        let ids: Vec<_> = t.ids().collect();
        assert_eq!(ids, [NodeId(2), NodeId(1), NodeId(3)]);
        assert_eq!(t.get(NodeId(1)).unwrap().distance_along_route_m, 20.0);
    }

    #[test]
    fn segment_time() {
        let mut n = node(1, 0.0);
        n.speed_kmh = 72.0;
        n.segment_length_m = 100.0;
        assert!((n.segment_time_secs().unwrap() - 5.0).abs() < 1e-12);
        n.speed_kmh = 0.0;
        assert!(n.segment_time_secs().is_none());
    }
}

// ── Speed reconciliation ──────────────────────────────────────────────────────

#[cfg(test)]
mod reconcile {
    use bl_core::{AnalysisConfig, GeoPoint, NodeId};

    use crate::{NodeTable, RouteError, RouteNode, SpeedLimit, SpeedLimitTags, reconcile_speeds};

    fn table_with_speeds(speeds: &[f64]) -> NodeTable {
        NodeTable::from_nodes(
            speeds
                .iter()
                .enumerate()
                .map(|(i, &s)| RouteNode {
                    id:                     NodeId(i as u64),
                    coordinates:            GeoPoint::new(0.0, i as f64 * 0.001),
                    route_speed_kmh:        s,
                    speed_kmh:              s,
                    distance_along_route_m: i as f64 * 100.0,
                    segment_length_m:       if i == 0 { 0.0 } else { 100.0 },
                    elapsed_secs:           i as f64 * 4.0,
                })
                .collect(),
        )
    }

    fn speeds(t: &NodeTable) -> Vec<f64> {
        t.iter().map(|n| n.speed_kmh).collect()
    }

    #[test]
    fn parse_tags() {
        assert_eq!(SpeedLimit::parse("100"), Some(SpeedLimit::Kmh(100.0)));
        assert_eq!(SpeedLimit::parse(" none "), Some(SpeedLimit::Unlimited));
        assert_eq!(SpeedLimit::parse("signals"), None);
        assert_eq!(SpeedLimit::parse("50 mph"), None);
        assert_eq!(SpeedLimit::Unlimited.kmh(), f64::INFINITY);
    }

    #[test]
    fn numeric_tag_replaces_capped_speed() {
        let mut t = table_with_speeds(&[0.0, 115.0]);
        let mut tags = SpeedLimitTags::new();
        tags.insert_first(NodeId(1), "100");
        reconcile_speeds(&mut t, &tags, &AnalysisConfig::default()).unwrap();
        assert_eq!(speeds(&t), [0.0, 100.0]);
    }

    #[test]
    fn none_tag_goes_to_global_cap() {
        let mut t = table_with_speeds(&[0.0, 115.0]);
        let mut tags = SpeedLimitTags::new();
        tags.insert_first(NodeId(1), "none");
        reconcile_speeds(&mut t, &tags, &AnalysisConfig::default()).unwrap();
        assert_eq!(speeds(&t), [0.0, 130.0]);
    }

    #[test]
    fn below_threshold_is_unchanged() {
        let mut t = table_with_speeds(&[0.0, 90.0]);
        let mut tags = SpeedLimitTags::new();
        tags.insert_first(NodeId(1), "none");
        reconcile_speeds(&mut t, &tags, &AnalysisConfig::default()).unwrap();
        assert_eq!(speeds(&t), [0.0, 90.0]);
    }

    #[test]
    fn untagged_nodes_are_only_clamped() {
        let mut t = table_with_speeds(&[0.0, 112.0, 140.0]);
        let config = AnalysisConfig { max_speed_kmh: 111.0, ..AnalysisConfig::default() };
        reconcile_speeds(&mut t, &SpeedLimitTags::new(), &config).unwrap();
        assert_eq!(speeds(&t), [0.0, 111.0, 111.0]);
    }

    #[test]
    fn first_tag_wins() {
        let mut tags = SpeedLimitTags::new();
        tags.insert_first(NodeId(1), "80");
        tags.insert_first(NodeId(1), "120");
        assert_eq!(tags.get(NodeId(1)), Some("80"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn rerun_with_new_cap_starts_from_route_speed() {
        let mut t = table_with_speeds(&[0.0, 115.0]);
        let mut tags = SpeedLimitTags::new();
        tags.insert_first(NodeId(1), "none");
        let low = AnalysisConfig { max_speed_kmh: 100.0, ..AnalysisConfig::default() };
        reconcile_speeds(&mut t, &tags, &low).unwrap();
        assert_eq!(speeds(&t), [0.0, 100.0]);
        let high = AnalysisConfig { max_speed_kmh: 160.0, ..AnalysisConfig::default() };
        reconcile_speeds(&mut t, &tags, &high).unwrap();
        assert_eq!(speeds(&t), [0.0, 160.0]);
    }

    #[test]
    fn unparseable_tag_fails_and_leaves_table() {
        let mut t = table_with_speeds(&[0.0, 120.0]);
        let mut tags = SpeedLimitTags::new();
        tags.insert_first(NodeId(1), "walk");
        let err = reconcile_speeds(&mut t, &tags, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, RouteError::SpeedLimitParse { node, .. } if node == NodeId(1)));
        assert_eq!(speeds(&t), [0.0, 120.0]);
    }
}
