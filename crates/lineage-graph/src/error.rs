pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("{operation} requires an acyclic graph, but a cycle was found")]
    NotADag { operation: &'static str },
}

impl GraphError {
    pub(crate) fn not_a_dag(operation: &'static str) -> Self {
        tracing::debug!(operation, "graph is not a DAG");
        Self::NotADag { operation }
    }
}
