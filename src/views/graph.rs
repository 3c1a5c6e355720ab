// src/views/graph.rs
//! Relationship-graph view. Deliberately a static placeholder: the upstream
//! product embeds an external visualization and ships no layout, force
//! simulation, or edge model of its own, so there is nothing to compute here.

use serde::Serialize;

const GRAPH_EMBED_URL: &str = "https://react-graph.project.slray.com/";

#[derive(Debug, Clone, Serialize)]
pub struct GraphRenderModel {
    pub title: &'static str,
    pub embed_url: &'static str,
    /// Always empty; reserved for a real node model if one ever lands.
    pub nodes: Vec<String>,
}

pub fn render() -> GraphRenderModel {
    GraphRenderModel {
        title: "Event Relationship History",
        embed_url: GRAPH_EMBED_URL,
        nodes: Vec::new(),
    }
}
