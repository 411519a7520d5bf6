//! Artifact lookup against a Solr-style package search endpoint.

mod maven;

pub use maven::{MavenSearch, SearchDoc, SearchResponse};
