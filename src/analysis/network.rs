//! Keyword co-occurrence networks.
//!
//! One network per corpus partition, built fresh each run: nodes are the
//! partition's most frequent terms, edges join terms that appear in the same
//! document, weighted by how often they co-occur.

use crate::analysis::community::{self, CommunityError};
use crate::analysis::normalize;
use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// A retained term with its graph annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermNode {
    pub term: String,
    /// Degree over `n - 1`, in `[0, 1]`.
    pub centrality: f64,
    pub community: usize,
}

/// How community labels were assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommunityOutcome {
    /// Modularity clustering found `count` communities.
    Detected { count: usize, modularity: f64 },
    /// Clustering could not run; every node carries label 0.
    SingleCommunity { reason: String },
}

/// An undirected weighted term graph.
#[derive(Debug, Clone)]
pub struct CooccurrenceNetwork {
    pub graph: UnGraph<TermNode, u64>,
    pub communities: CommunityOutcome,
}

#[derive(Debug, Serialize)]
pub struct EdgeExport<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub weight: u64,
}

/// Serializable view of a network for the rendering scripts.
#[derive(Debug, Serialize)]
pub struct NetworkExport<'a> {
    pub nodes: Vec<&'a TermNode>,
    pub edges: Vec<EdgeExport<'a>>,
    pub community_detection: &'a CommunityOutcome,
}

impl CooccurrenceNetwork {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn export(&self) -> NetworkExport<'_> {
        NetworkExport {
            nodes: self.graph.node_weights().collect(),
            edges: self
                .graph
                .edge_references()
                .map(|e| EdgeExport {
                    source: &self.graph[e.source()].term,
                    target: &self.graph[e.target()].term,
                    weight: *e.weight(),
                })
                .collect(),
            community_detection: &self.communities,
        }
    }
}

/// The `top_n` most frequent terms across `docs`, alphabetically ordered.
///
/// General English stopwords never rank. Terms are ranked by total
/// occurrences; equal counts fall back to alphabetical order.
pub fn vocabulary(docs: &[&str], top_n: usize) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for token in docs
        .iter()
        .flat_map(|d| d.split_whitespace())
        .filter(|t| !normalize::is_english_stopword(t))
    {
        *totals.entry(token).or_default() += 1;
    }
    totals
        .into_iter()
        .sorted_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then(ta.cmp(tb)))
        .take(top_n)
        .map(|(term, _)| term.to_string())
        .sorted()
        .collect()
}

/// Build the co-occurrence network for one partition.
///
/// `docs` are stopword-filtered texts, one per record. Returns `None` when
/// there are fewer than two documents or no vocabulary survives.
pub fn build_network(docs: &[&str], top_n: usize) -> Option<CooccurrenceNetwork> {
    if docs.len() < 2 {
        info!(documents = docs.len(), "Too few documents for a network");
        return None;
    }
    let vocab = vocabulary(docs, top_n);
    if vocab.is_empty() {
        info!(documents = docs.len(), "Empty vocabulary; no network");
        return None;
    }
    let position: HashMap<&str, usize> = vocab
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();

    // Document-term counts restricted to the vocabulary.
    let counts: Vec<Vec<u64>> = docs
        .iter()
        .map(|doc| {
            let mut row = vec![0u64; vocab.len()];
            for token in doc.split_whitespace() {
                if let Some(&i) = position.get(token) {
                    row[i] += 1;
                }
            }
            row
        })
        .collect();

    let mut graph: UnGraph<TermNode, u64> = UnGraph::with_capacity(vocab.len(), 0);
    let nodes: Vec<NodeIndex> = vocab
        .iter()
        .map(|term| {
            graph.add_node(TermNode {
                term: term.clone(),
                centrality: 0.0,
                community: 0,
            })
        })
        .collect();

    for (i, j) in (0..vocab.len()).tuple_combinations() {
        let weight: u64 = counts.iter().map(|row| row[i] * row[j]).sum();
        if weight > 0 {
            graph.add_edge(nodes[i], nodes[j], weight);
        }
    }

    let n = graph.node_count();
    for idx in graph.node_indices() {
        let degree = graph.neighbors(idx).count();
        graph[idx].centrality = if n > 1 {
            degree as f64 / (n - 1) as f64
        } else {
            1.0
        };
    }

    let communities = match community::greedy_modularity(&graph) {
        Ok(groups) => {
            for (label, group) in groups.iter().enumerate() {
                for &idx in group {
                    graph[idx].community = label;
                }
            }
            let labels: Vec<usize> = graph.node_weights().map(|n| n.community).collect();
            CommunityOutcome::Detected {
                count: groups.len(),
                modularity: community::modularity(&graph, &labels),
            }
        }
        Err(e @ CommunityError::NoEdges) => {
            warn!(error = %e, "Community detection failed; using a single community");
            CommunityOutcome::SingleCommunity {
                reason: e.to_string(),
            }
        }
    };

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        ?communities,
        "Built co-occurrence network"
    );
    Some(CooccurrenceNetwork { graph, communities })
}

#[cfg(test)]
mod tests {
    use super::*;

    impl CooccurrenceNetwork {
        fn node(&self, term: &str) -> Option<&TermNode> {
            self.graph.node_weights().find(|n| n.term == term)
        }

        fn weight(&self, a: &str, b: &str) -> Option<u64> {
            let index_of = |t: &str| self.graph.node_indices().find(|&i| self.graph[i].term == t);
            let edge = self.graph.find_edge(index_of(a)?, index_of(b)?)?;
            Some(self.graph[edge])
        }
    }

    #[test]
    fn test_small_example() {
        let docs = ["chip export control", "chip sanction control"];
        let net = build_network(&docs, 3).unwrap();
        let terms: Vec<_> = net.graph.node_weights().map(|n| n.term.as_str()).collect();
        assert_eq!(terms, vec!["chip", "control", "export"]);
        assert_eq!(net.weight("chip", "control"), Some(2));
        assert_eq!(net.weight("chip", "export"), Some(1));
        assert_eq!(net.weight("control", "export"), Some(1));
        assert_eq!(net.node("chip").unwrap().centrality, 1.0);
    }

    #[test]
    fn test_repeated_terms_multiply() {
        let docs = ["chip chip fab", "fab"];
        let net = build_network(&docs, 10).unwrap();
        assert_eq!(net.weight("chip", "fab"), Some(2));
    }

    #[test]
    fn test_too_few_documents() {
        assert!(build_network(&[], 30).is_none());
        assert!(build_network(&["chip export"], 30).is_none());
    }

    #[test]
    fn test_empty_vocabulary() {
        assert!(build_network(&["", "  "], 30).is_none());
    }

    #[test]
    fn test_no_self_loops_and_node_limit() {
        let docs = [
            "chip chip export control taiwan",
            "fab fab fab tsmc taiwan",
            "huawei export control sanction",
            "nvidia chip gpu export",
        ];
        let net = build_network(&docs, 5).unwrap();
        assert!(net.node_count() <= 5);
        for e in net.graph.edge_references() {
            assert_ne!(e.source(), e.target());
        }
        for node in net.graph.node_weights() {
            assert!((0.0..=1.0).contains(&node.centrality));
        }
    }

    #[test]
    fn test_vocabulary_ties_are_alphabetical() {
        let docs = ["zeta beta alpha", "beta"];
        assert_eq!(vocabulary(&docs, 2), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_english_function_words_never_become_nodes() {
        let docs = ["however many chips between firms", "however many chips between nations"];
        let net = build_network(&docs, 4).unwrap();
        let terms: Vec<_> = net.graph.node_weights().map(|n| n.term.as_str()).collect();
        assert_eq!(terms, vec!["chips", "firms", "nations"]);
    }

    #[test]
    fn test_edgeless_graph_falls_back_to_single_community() {
        let docs = ["chip", "export"];
        let net = build_network(&docs, 10).unwrap();
        assert_eq!(net.edge_count(), 0);
        assert!(matches!(
            net.communities,
            CommunityOutcome::SingleCommunity { .. }
        ));
        assert!(net.graph.node_weights().all(|n| n.community == 0));
    }

    #[test]
    fn test_single_node_centrality() {
        let net = build_network(&["chip", "chip"], 10).unwrap();
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.node("chip").unwrap().centrality, 1.0);
    }

    #[test]
    fn test_communities_split_clusters() {
        let docs = [
            "chip fab wafer",
            "chip fab wafer",
            "tariff trade deal",
            "tariff trade deal",
            "wafer tariff",
        ];
        let net = build_network(&docs, 10).unwrap();
        match net.communities {
            CommunityOutcome::Detected { count, modularity } => {
                assert_eq!(count, 2);
                assert!(modularity > 0.0);
            }
            ref other => panic!("unexpected outcome {other:?}"),
        }
        let chip = net.node("chip").unwrap().community;
        assert_eq!(net.node("fab").unwrap().community, chip);
        assert_ne!(net.node("trade").unwrap().community, chip);
    }

    #[test]
    fn test_export_shape() {
        let docs = ["chip export control", "chip sanction control"];
        let net = build_network(&docs, 3).unwrap();
        let json = serde_json::to_value(net.export()).unwrap();
        assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(json["edges"].as_array().unwrap().len(), 3);
        assert_eq!(json["community_detection"]["status"], "detected");
    }
}
