//! Broker identification: entities that bridge poorly connected parts of the
//! network.
//!
//! A broker is any node whose normalized betweenness strictly exceeds the
//! configured threshold. An empty result is the normal answer for networks
//! without bridging structure.

use std::cmp::Ordering;

/// A node whose betweenness exceeds the broker threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Broker {
    pub node: usize,
    pub score: f64,
}

/// Select brokers from normalized node betweenness.
///
/// Sorted by score descending; equal scores keep ascending node index, which
/// is ascending id order.
#[must_use]
pub fn identify_brokers(betweenness: &[f64], threshold: f64) -> Vec<Broker> {
    let mut brokers: Vec<Broker> = betweenness
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score > threshold)
        .map(|(node, &score)| Broker { node, score })
        .collect();

    brokers.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.node.cmp(&b.node))
    });
    brokers
}
