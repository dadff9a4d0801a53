use thiserror::Error;
use wp_graph::GraphError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("routing error: {0}")]
    Routing(#[from] GraphError),

    #[error("no marker labelled {0:?}")]
    UnknownLabel(String),
}

pub type SimResult<T> = Result<T, SimError>;
