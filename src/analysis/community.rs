//! Greedy modularity community detection (Clauset–Newman–Moore).
//!
//! Starts with every node in its own community and repeatedly merges the
//! connected pair of communities with the largest modularity gain, stopping
//! once no merge increases modularity. Edges count once each; weights are
//! ignored. Communities are returned largest first.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunityError {
    /// Modularity is undefined without edges.
    NoEdges,
}

impl fmt::Display for CommunityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunityError::NoEdges => f.write_str("graph has no edges"),
        }
    }
}

impl std::error::Error for CommunityError {}

/// Partition the nodes of `graph` into communities.
///
/// # Returns
///
/// Node groups ordered by descending size; ties keep the group holding the
/// lowest node index first. Members within a group are in index order.
///
/// # Errors
///
/// [`CommunityError::NoEdges`] if the graph has no non-loop edge.
pub fn greedy_modularity<N, E>(graph: &UnGraph<N, E>) -> Result<Vec<Vec<NodeIndex>>, CommunityError> {
    let n = graph.node_count();
    let mut adjacency = vec![vec![0.0f64; n]; n];
    let mut edges = 0usize;
    for edge in graph.edge_references() {
        let (u, v) = (edge.source().index(), edge.target().index());
        if u == v {
            continue;
        }
        adjacency[u][v] += 1.0;
        adjacency[v][u] += 1.0;
        edges += 1;
    }
    if edges == 0 {
        return Err(CommunityError::NoEdges);
    }

    let two_m = 2.0 * edges as f64;
    // e[i][j]: fraction of edge ends joining community i to j; a[i]: fraction of ends in i.
    let mut e: Vec<Vec<f64>> = adjacency
        .iter()
        .map(|row| row.iter().map(|w| w / two_m).collect())
        .collect();
    let mut a: Vec<f64> = adjacency
        .iter()
        .map(|row| row.iter().sum::<f64>() / two_m)
        .collect();
    let mut members: Vec<Option<Vec<usize>>> = (0..n).map(|i| Some(vec![i])).collect();

    loop {
        let mut best: Option<(f64, usize, usize)> = None;
        for i in 0..n {
            if members[i].is_none() {
                continue;
            }
            for j in (i + 1)..n {
                if members[j].is_none() || e[i][j] <= 0.0 {
                    continue;
                }
                let dq = 2.0 * (e[i][j] - a[i] * a[j]);
                if best.is_none_or(|(b, _, _)| dq > b) {
                    best = Some((dq, i, j));
                }
            }
        }

        let Some((dq, i, j)) = best else { break };
        if dq <= 0.0 {
            break;
        }

        // Fold j into i.
        for k in 0..n {
            if k == i || k == j {
                continue;
            }
            e[i][k] += e[j][k];
            e[k][i] = e[i][k];
            e[j][k] = 0.0;
            e[k][j] = 0.0;
        }
        e[i][i] += e[j][j] + 2.0 * e[i][j];
        e[i][j] = 0.0;
        e[j][i] = 0.0;
        e[j][j] = 0.0;
        a[i] += a[j];
        a[j] = 0.0;

        let moved = members[j].take().unwrap_or_default();
        if let Some(group) = members[i].as_mut() {
            group.extend(moved);
            group.sort_unstable();
        }
    }

    let mut groups: Vec<Vec<usize>> = members.into_iter().flatten().collect();
    groups.sort_by(|x, y| y.len().cmp(&x.len()).then(x[0].cmp(&y[0])));
    Ok(groups
        .into_iter()
        .map(|g| g.into_iter().map(NodeIndex::new).collect())
        .collect())
}

/// Modularity of a labelling, treating each edge as weight one.
pub fn modularity<N, E>(graph: &UnGraph<N, E>, labels: &[usize]) -> f64 {
    let edges: Vec<(usize, usize)> = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()))
        .filter(|(u, v)| u != v)
        .collect();
    if edges.is_empty() {
        return 0.0;
    }
    let m = edges.len() as f64;
    let communities = labels.iter().copied().max().map_or(0, |c| c + 1);
    let mut internal = vec![0.0f64; communities];
    let mut degree = vec![0.0f64; communities];
    for (u, v) in edges {
        if labels[u] == labels[v] {
            internal[labels[u]] += 1.0;
        }
        degree[labels[u]] += 1.0;
        degree[labels[v]] += 1.0;
    }
    internal
        .iter()
        .zip(&degree)
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum()
}
