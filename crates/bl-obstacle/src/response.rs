//! Splitting a geometry-service response into its groups.
//!
//! Group boundaries are NOT fixed: the leading count records say how many
//! way records follow.  See [`crate::query`] for the emission order.

use std::io::Read;

use serde::Deserialize;

use bl_route::{NodeTable, SpeedLimitTags};

use crate::wire::{OverpassCount, OverpassElement, OverpassWay};
use crate::{ObstacleError, ObstacleResult};

/// A geometry-service response split into its three way groups.
#[derive(Debug, Clone, Default)]
pub struct ObstacleResponse {
    /// Ways that make up the route itself (bodies with tags and node lists).
    pub route_ways: Vec<OverpassWay>,
    /// Tunnels on the route (geometries).
    pub tunnels: Vec<OverpassWay>,
    /// Bridges crossing over the route (geometries).
    pub bridges: Vec<OverpassWay>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

impl ObstacleResponse {
    /// Parse the full `{ "elements": [...] }` document and split it.
    pub fn from_json_reader<R: Read>(reader: R) -> ObstacleResult<Self> {
        let envelope: Envelope = serde_json::from_reader(reader)?;
        Self::split(envelope.elements)
    }

    /// Split a flat element list using its count records.
    pub fn split(elements: Vec<OverpassElement>) -> ObstacleResult<Self> {
        let mut iter = elements.into_iter().peekable();

        let route_count = expect_count(iter.next(), "route way")?.ways()?;
        let route_ways = take_ways(&mut iter, Some(route_count), "route way")?;

        let tunnel_count = expect_count(iter.next(), "tunnel")?.ways()?;
        let mut crossing = take_ways(&mut iter, None, "obstacle")?;

        if tunnel_count > crossing.len() {
            return Err(ObstacleError::MalformedResponse(format!(
                "tunnel count {tunnel_count} exceeds the {} obstacle records present",
                crossing.len()
            )));
        }
        if iter.peek().is_some() {
            log::warn!("ignoring trailing records after the obstacle group");
        }
        let bridges = crossing.split_off(tunnel_count);
        let tunnels = crossing;

        log::debug!(
            "obstacle response: {} route ways, {} tunnels, {} crossing bridges",
            route_ways.len(),
            tunnels.len(),
            bridges.len()
        );

        Ok(Self { route_ways, tunnels, bridges })
    }
}

fn expect_count(element: Option<OverpassElement>, group: &str) -> ObstacleResult<OverpassCount> {
    match element {
        Some(OverpassElement::Count(c)) => Ok(c),
        Some(OverpassElement::Way(w)) => Err(ObstacleError::MalformedResponse(format!(
            "expected {group} count record, found way {}",
            w.id
        ))),
        None => Err(ObstacleError::MalformedResponse(format!("missing {group} count record"))),
    }
}

/// Take exactly `limit` way records, or every consecutive way record when
/// `limit` is `None`.
fn take_ways<I: Iterator<Item = OverpassElement>>(
    iter: &mut std::iter::Peekable<I>,
    limit: Option<usize>,
    group: &str,
) -> ObstacleResult<Vec<OverpassWay>> {
    let mut ways = Vec::new();
    while limit.is_none_or(|n| ways.len() < n) {
        match iter.peek() {
            Some(OverpassElement::Way(_)) => {
                if let Some(OverpassElement::Way(w)) = iter.next() {
                    ways.push(w);
                }
            }
            Some(OverpassElement::Count(_)) | None => break,
        }
    }
    if let Some(n) = limit.filter(|&n| ways.len() != n) {
        return Err(ObstacleError::MalformedResponse(format!(
            "{group} count says {n} but only {} records follow",
            ways.len()
        )));
    }
    Ok(ways)
}

/// Join route-way `maxspeed` tags onto the nodes of `table`.
///
/// Ways are visited in response order; the first way carrying a tag for a
/// node wins.  Ways without a `maxspeed` tag contribute nothing.
pub fn speed_limit_tags(route_ways: &[OverpassWay], table: &NodeTable) -> SpeedLimitTags {
    let mut tags = SpeedLimitTags::new();
    for way in route_ways {
        let Some(maxspeed) = way.tag("maxspeed") else { continue };
        for &node in way.nodes.iter().filter(|n| table.contains(**n)) {
            tags.insert_first(node, maxspeed);
        }
    }
    log::debug!("speed limit tags joined for {} route nodes", tags.len());
    tags
}
