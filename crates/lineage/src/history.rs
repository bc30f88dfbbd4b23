//! The version history of a set of images.

use crate::config::HistoryConfig;
use crate::error::{Error, Result};
use crate::model::{
    FilterAction, HistoryEdge, HistoryVertex, ImageId, ImageRelation, relations_from_json,
};
use lineage_graph::{
    AdjacencyFlags, Edge, Graph, GraphCopyFlags, MeaningOfDirection, ReturnOrder, Toward, Vertex,
    alg,
};
use std::time::Instant;

/// Where an image sits in its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryImageCategory {
    /// Has derived versions but no parent.
    Original,
    /// Has both a parent and derived versions.
    Intermediate,
    /// Derived from another version, with nothing derived from it.
    Current,
    /// Not related to any other version.
    Single,
}

/// Image versions connected by "derived from" relations.
///
/// Parent and child are always given in history terms; the configured
/// [`MeaningOfDirection`] only decides how edges are stored.
#[derive(Debug, Clone, Default)]
pub struct HistoryGraph {
    graph: Graph<HistoryVertex, HistoryEdge>,
    config: HistoryConfig,
}

impl HistoryGraph {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            graph: Graph::new(config.direction),
            config,
        }
    }

    /// Builds a history from relation records, reducing it afterwards if
    /// [`HistoryConfig::reduce_on_load`] is set.
    pub fn from_relations(relations: &[ImageRelation], config: HistoryConfig) -> Result<Self> {
        let start = config.timing.then(Instant::now);
        let mut history = Self::new(config);
        history.add_relations(relations);
        if config.reduce_on_load {
            history.reduce_edges()?;
        }
        if let Some(start) = start {
            tracing::debug!(
                relations = relations.len(),
                images = history.graph.vertex_count(),
                edges = history.graph.edge_count(),
                elapsed = ?start.elapsed(),
                "loaded image history"
            );
        }
        Ok(history)
    }

    pub fn from_json(text: &str, config: HistoryConfig) -> Result<Self> {
        Self::from_relations(&relations_from_json(text)?, config)
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph<HistoryVertex, HistoryEdge> {
        &self.graph
    }

    /// Number of distinct versions.
    pub fn len(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn contains(&self, id: ImageId) -> bool {
        self.vertex_for(id).is_some()
    }

    pub fn vertex_for(&self, id: ImageId) -> Option<Vertex> {
        self.graph.find_vertex_by_properties(&id)
    }

    /// The vertex holding `id`, created if the image is not known yet.
    pub fn add_image(&mut self, id: ImageId) -> Vertex {
        match self.vertex_for(id) {
            Some(v) => v,
            None => self.graph.add_vertex_with(HistoryVertex::new(id)),
        }
    }

    /// Records `duplicate` as another file of the same version as `existing`.
    ///
    /// Fails with [`Error::ConflictingDuplicate`] if `duplicate` is already a file of a
    /// different version; versions are never merged implicitly.
    pub fn add_duplicate(&mut self, existing: ImageId, duplicate: ImageId) -> Result<()> {
        let v = self.require(existing)?;
        match self.vertex_for(duplicate) {
            Some(known) if known == v => return Ok(()),
            Some(_) => {
                return Err(Error::ConflictingDuplicate {
                    existing,
                    duplicate,
                });
            }
            None => {}
        }
        if let Some(props) = self.graph.vertex_properties_mut(v) {
            props.image_ids.push(duplicate);
        }
        Ok(())
    }

    pub fn add_relations(&mut self, relations: &[ImageRelation]) {
        for relation in relations {
            self.add_derivation(relation.object, relation.subject, Vec::new());
        }
    }

    /// Records that `child` was derived from `parent` by `actions`. Actions recorded for an
    /// existing derivation are appended.
    pub fn add_derivation(
        &mut self,
        parent: ImageId,
        child: ImageId,
        actions: Vec<FilterAction>,
    ) -> Edge {
        let p = self.add_image(parent);
        let c = self.add_image(child);
        let (s, t) = self.stored(p, c);
        if let Some(e) = self.graph.edge(s, t) {
            if let Some(edge) = self.graph.edge_properties_mut(e) {
                edge.actions.extend(actions);
            }
            return e;
        }
        self.graph.add_edge_with(s, t, HistoryEdge { actions })
    }

    /// Actions recorded for the derivation of `child` from `parent`; empty if there is none.
    pub fn actions(&self, parent: ImageId, child: ImageId) -> Result<Vec<FilterAction>> {
        let p = self.require(parent)?;
        let c = self.require(child)?;
        let (s, t) = self.stored(p, c);
        Ok(self.graph.edge_properties_between(s, t).actions)
    }

    /// Every stored derivation as relation records, in edge storage order. A derivation
    /// between versions with several files yields one record per pair of image ids, the same
    /// expansion [`relation_cloud`](Self::relation_cloud) uses.
    pub fn relations(&self) -> Vec<ImageRelation> {
        self.graph
            .edges()
            .flat_map(|e| self.relations_of(e))
            .collect()
    }

    pub fn roots(&self) -> Vec<ImageId> {
        self.all_ids(&self.graph.roots())
    }

    pub fn leaves(&self) -> Vec<ImageId> {
        self.all_ids(&self.graph.leaves())
    }

    /// The originals `id` descends from (including `id` itself if it has no parent).
    pub fn roots_for(&self, id: ImageId) -> Result<Vec<ImageId>> {
        let v = self.require(id)?;
        Ok(self.ends_toward(v, Toward::Roots, AdjacencyFlags::TO_ROOTS))
    }

    /// The most recent versions derived from `id` (including `id` itself if nothing is).
    pub fn leaves_for(&self, id: ImageId) -> Result<Vec<ImageId>> {
        let v = self.require(id)?;
        Ok(self.ends_toward(v, Toward::Leaves, AdjacencyFlags::TO_LEAVES))
    }

    pub fn categorize(&self, id: ImageId) -> Result<HistoryImageCategory> {
        let v = self.require(id)?;
        let has_parent = !self
            .graph
            .adjacent_vertices(v, AdjacencyFlags::TO_ROOTS)
            .is_empty();
        let has_child = !self
            .graph
            .adjacent_vertices(v, AdjacencyFlags::TO_LEAVES)
            .is_empty();
        Ok(match (has_parent, has_child) {
            (false, false) => HistoryImageCategory::Single,
            (false, true) => HistoryImageCategory::Original,
            (true, true) => HistoryImageCategory::Intermediate,
            (true, false) => HistoryImageCategory::Current,
        })
    }

    /// Removes derivations that are implied by a longer chain, in place. Returns the
    /// removed relations, expanded like [`relations`](Self::relations); their actions are
    /// dropped.
    pub fn reduce_edges(&mut self) -> Result<Vec<ImageRelation>> {
        let start = self.config.timing.then(Instant::now);
        let (_, removed) = self
            .graph
            .transitive_reduction_with_removed(GraphCopyFlags::NONE)?;

        let mut relations: Vec<ImageRelation> = Vec::with_capacity(removed.len());
        for e in removed {
            relations.extend(self.relations_of(e));
            self.graph.remove_edge(e);
        }

        if let Some(start) = start {
            tracing::debug!(
                removed = relations.len(),
                elapsed = ?start.elapsed(),
                "reduced image history"
            );
        }
        Ok(relations)
    }

    /// Every pair of versions where one descends from the other, directly or not, sorted.
    pub fn relation_cloud(&self) -> Result<Vec<ImageRelation>> {
        let start = self.config.timing.then(Instant::now);
        let closure = self
            .graph
            .transitive_closure(GraphCopyFlags::VERTEX_PROPERTIES)?;

        let mut cloud: Vec<ImageRelation> = Vec::new();
        for (s, t) in closure.edge_pairs() {
            let (parent, child) = self.history_order(s, t);
            let (Some(parent), Some(child)) = (
                closure.vertex_properties(parent),
                closure.vertex_properties(child),
            ) else {
                continue;
            };
            cloud.extend(id_pairs(parent, child));
        }
        cloud.sort_unstable();
        cloud.dedup();

        if let Some(start) = start {
            tracing::debug!(
                relations = cloud.len(),
                elapsed = ?start.elapsed(),
                "computed relation cloud"
            );
        }
        Ok(cloud)
    }

    /// Versions that were derived from `id` and could not exist without it: every path
    /// from an original to them passes through `id`. `id` itself is not included.
    pub fn derived_from(&self, id: ImageId, order: ReturnOrder) -> Result<Vec<ImageId>> {
        let v = self.require(id)?;

        // A synthetic vertex above all originals turns the forest into a single-rooted graph.
        let mut g = self.graph.clone();
        let top = g.add_vertex();
        for root in self.graph.roots() {
            let (s, t) = self.stored(top, root);
            g.add_edge(s, t);
        }

        let dominated: Vec<Vertex> = g
            .vertices_dominated_by(v, top, order)
            .into_iter()
            .filter(|&u| u != v)
            .collect();
        Ok(self.all_ids(&dominated))
    }

    /// The longest chain of versions through `id`, from an original to a current version.
    pub fn history_of(&self, id: ImageId) -> Result<Vec<ImageId>> {
        let v = self.require(id)?;
        let mut path = self.graph.longest_path_touching(v)?;
        if self.config.direction == MeaningOfDirection::ChildToParent {
            path.reverse();
        }
        Ok(self.primary_ids(&path))
    }

    /// The shortest chain of versions from `a` to `b`, in either direction. Empty if
    /// neither descends from the other.
    pub fn path_between(&self, a: ImageId, b: ImageId) -> Result<Vec<ImageId>> {
        let va = self.require(a)?;
        let vb = self.require(b)?;
        let path = self.graph.shortest_path(va, vb)?;
        Ok(self.primary_ids(&path))
    }

    /// All images with every parent listed before its children.
    pub fn sorted_images(&self) -> Result<Vec<ImageId>> {
        let mut order = self.graph.topological_sort()?;
        if self.config.direction == MeaningOfDirection::ChildToParent {
            order.reverse();
        }
        Ok(self.all_ids(&order))
    }

    /// Groups of images that (inconsistently) derive from each other.
    pub fn cycles(&self) -> Vec<Vec<ImageId>> {
        alg::find_cycles(&self.graph)
            .iter()
            .map(|group| self.all_ids(group))
            .collect()
    }

    fn require(&self, id: ImageId) -> Result<Vertex> {
        self.vertex_for(id).ok_or(Error::UnknownImage { id })
    }

    /// Physical `(source, target)` of the edge from `parent` to `child`.
    fn stored(&self, parent: Vertex, child: Vertex) -> (Vertex, Vertex) {
        match self.config.direction {
            MeaningOfDirection::ParentToChild => (parent, child),
            MeaningOfDirection::ChildToParent => (child, parent),
        }
    }

    /// `(parent, child)` of a physical `(source, target)` pair.
    fn history_order(&self, source: Vertex, target: Vertex) -> (Vertex, Vertex) {
        self.stored(source, target)
    }

    fn relations_of(&self, e: Edge) -> Vec<ImageRelation> {
        let (Some(source), Some(target)) = (self.graph.source(e), self.graph.target(e)) else {
            return Vec::new();
        };
        let (parent, child) = self.history_order(source, target);
        match (
            self.graph.vertex_properties(parent),
            self.graph.vertex_properties(child),
        ) {
            (Some(parent), Some(child)) => id_pairs(parent, child).collect(),
            _ => Vec::new(),
        }
    }

    fn ends_toward(&self, v: Vertex, toward: Toward, flags: AdjacencyFlags) -> Vec<ImageId> {
        let ends: Vec<Vertex> = alg::bfs(&self.graph, v, toward)
            .into_iter()
            .filter(|&u| self.graph.adjacent_vertices(u, flags).is_empty())
            .collect();
        self.all_ids(&ends)
    }

    fn all_ids(&self, vertices: &[Vertex]) -> Vec<ImageId> {
        vertices
            .iter()
            .filter_map(|&v| self.graph.vertex_properties(v))
            .flat_map(|props| props.image_ids.iter().copied())
            .collect()
    }

    fn primary_ids(&self, vertices: &[Vertex]) -> Vec<ImageId> {
        vertices
            .iter()
            .filter_map(|&v| self.graph.vertex_properties(v)?.primary_id())
            .collect()
    }
}

/// `child` derived from `parent`, for every pair of their image ids.
fn id_pairs<'a>(
    parent: &'a HistoryVertex,
    child: &'a HistoryVertex,
) -> impl Iterator<Item = ImageRelation> + 'a {
    child.image_ids.iter().flat_map(move |&subject| {
        parent
            .image_ids
            .iter()
            .map(move |&object| ImageRelation { subject, object })
    })
}
