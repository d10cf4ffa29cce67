use classgen_spec::types::common::Backend;
use thiserror::Error;

use crate::traits::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("unsupported operation: {backend} {node} nodes do not accept children")]
    UnsupportedOperation { node: NodeKind, backend: Backend },

    #[error("invalid access level: {backend} supports ordinals below {supported}, got {ordinal}")]
    InvalidAccessLevel {
        backend: Backend,
        ordinal: u32,
        supported: usize,
    },

    #[error("invalid child: {backend} {parent} nodes only accept {expected} nodes, got a {child} node")]
    InvalidChild {
        backend: Backend,
        parent: NodeKind,
        expected: NodeKind,
        child: NodeKind,
    },

    #[error("backend mismatch: cannot insert a {child} node into a {parent} node")]
    BackendMismatch { parent: Backend, child: Backend },
}
