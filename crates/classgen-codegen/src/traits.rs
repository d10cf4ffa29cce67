use std::fmt;

use classgen_spec::types::common::{AccessLevel, Backend, Modifiers};

use crate::error::CodegenError;
use crate::indent::indent;

/// Which role a node plays in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    Method,
    Print,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Class => "class",
            NodeKind::Method => "method",
            NodeKind::Print => "print",
        };
        f.write_str(name)
    }
}

/// A renderable element of the class tree.
///
/// Every node is built by exactly one [`BackendFactory`] and remembers which
/// backend that was, so containers can refuse children from another backend.
pub trait Node: fmt::Debug + Send + Sync {
    /// Backend that constructed this node.
    fn backend(&self) -> Backend;

    fn kind(&self) -> NodeKind;

    /// Render this node and its children. Every line starts with `level`
    /// indentation tokens unless the target syntax says otherwise.
    fn render(&self, level: usize) -> String;

    /// Render with `prefix` placed between the leading indentation and the
    /// node's own text. Used for per-member access keywords.
    fn render_prefixed(&self, level: usize, prefix: &str) -> String {
        let rendered = self.render(level);
        let shift = indent(level);
        match rendered.strip_prefix(shift.as_str()) {
            Some(rest) => format!("{shift}{prefix}{rest}"),
            None => format!("{prefix}{rendered}"),
        }
    }

    /// Attach a child. `placement` is interpreted by the container (classes
    /// read it as an access level ordinal, methods ignore it).
    ///
    /// `None` is accepted by containers as a no-op. Leaves keep this default
    /// and always fail.
    fn insert(&mut self, child: Option<Box<dyn Node>>, placement: u32) -> Result<(), CodegenError> {
        let _ = (child, placement);
        Err(CodegenError::UnsupportedOperation {
            node: self.kind(),
            backend: self.backend(),
        })
    }

    /// Number of children owned directly by this node.
    fn child_count(&self) -> usize {
        0
    }
}

/// Sole construction path for one backend's node family.
pub trait BackendFactory: Send + Sync {
    /// Which backend this factory builds nodes for.
    fn backend(&self) -> Backend;

    /// Create an empty class. `access` falls back to the backend default
    /// when `None`; backends that do not support a class-level access or
    /// modifier ignore it.
    fn create_class(
        &self,
        name: &str,
        access: Option<AccessLevel>,
        modifiers: Modifiers,
    ) -> Result<Box<dyn Node>, CodegenError>;

    /// Create a method with an empty body. Any modifier combination is
    /// accepted; conflicts are resolved when rendering.
    fn create_method(&self, name: &str, return_type: &str, modifiers: Modifiers) -> Box<dyn Node>;

    /// Create a print statement emitting `text` verbatim.
    fn create_print(&self, text: &str) -> Box<dyn Node>;
}
