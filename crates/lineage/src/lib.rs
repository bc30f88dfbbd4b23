#![forbid(unsafe_code)]

//! Version history of images.
//!
//! Every image version is a vertex of a [`lineage_graph::Graph`]; an edge records that one
//! version was derived from another, together with the filter actions applied on the way.

pub mod config;
pub mod error;
pub mod history;
pub mod model;

pub use config::HistoryConfig;
pub use error::{Error, Result};
pub use history::{HistoryGraph, HistoryImageCategory};
pub use model::{
    ActionCategory, FilterAction, HistoryEdge, HistoryVertex, ImageId, ImageRelation,
    relations_from_json, relations_to_json,
};

pub use lineage_graph::{MeaningOfDirection, ReturnOrder};
