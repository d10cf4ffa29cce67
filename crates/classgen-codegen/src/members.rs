//! Child storage shared by every backend's container nodes.

use classgen_spec::types::common::{AccessLevel, Backend, Modifiers};
use tracing::{debug, warn};

use crate::error::CodegenError;
use crate::indent::indent;
use crate::traits::{Node, NodeKind};

/// Refuse a child built by another backend's factory.
fn check_backend(parent: Backend, child: &dyn Node) -> Result<(), CodegenError> {
    if child.backend() != parent {
        warn!(%parent, child = %child.backend(), "rejected cross-backend insertion");
        return Err(CodegenError::BackendMismatch {
            parent,
            child: child.backend(),
        });
    }
    Ok(())
}

/// Refuse a child whose role does not fit inside a `parent` container.
fn check_kind(
    backend: Backend,
    parent: NodeKind,
    expected: NodeKind,
    child: &dyn Node,
) -> Result<(), CodegenError> {
    if child.kind() != expected {
        warn!(%backend, %parent, child = %child.kind(), "rejected member of the wrong kind");
        return Err(CodegenError::InvalidChild {
            backend,
            parent,
            expected,
            child: child.kind(),
        });
    }
    Ok(())
}

/// Class members bucketed by access level, one bucket per level the
/// backend supports.
#[derive(Debug)]
pub(crate) struct AccessBuckets {
    backend: Backend,
    buckets: Vec<Vec<Box<dyn Node>>>,
}

impl AccessBuckets {
    pub(crate) fn new(backend: Backend) -> Self {
        Self {
            backend,
            buckets: (0..backend.access_level_count()).map(|_| Vec::new()).collect(),
        }
    }

    /// Append `child` to the bucket selected by `ordinal`. Validation happens
    /// before anything is stored, so a failed insert leaves every bucket as
    /// it was.
    pub(crate) fn insert(
        &mut self,
        child: Option<Box<dyn Node>>,
        ordinal: u32,
    ) -> Result<(), CodegenError> {
        let Some(child) = child else {
            return Ok(());
        };
        check_backend(self.backend, child.as_ref())?;
        check_kind(self.backend, NodeKind::Class, NodeKind::Method, child.as_ref())?;

        let supported = self.buckets.len();
        if ordinal as usize >= supported {
            warn!(backend = %self.backend, ordinal, supported, "rejected access level");
            return Err(CodegenError::InvalidAccessLevel {
                backend: self.backend,
                ordinal,
                supported,
            });
        }

        debug!(backend = %self.backend, ordinal, kind = %child.kind(), "inserted member");
        self.buckets[ordinal as usize].push(child);
        Ok(())
    }

    /// Non-empty buckets in access level order.
    pub(crate) fn non_empty(&self) -> impl Iterator<Item = (AccessLevel, &[Box<dyn Node>])> {
        self.backend
            .access_levels()
            .iter()
            .zip(&self.buckets)
            .filter(|(_, members)| !members.is_empty())
            .map(|(level, members)| (*level, members.as_slice()))
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

/// State common to every method node: signature parts plus the body.
#[derive(Debug)]
pub(crate) struct MethodParts {
    backend: Backend,
    name: String,
    return_type: String,
    pub(crate) modifiers: Modifiers,
    body: Vec<Box<dyn Node>>,
}

impl MethodParts {
    pub(crate) fn new(backend: Backend, name: &str, return_type: &str, modifiers: Modifiers) -> Self {
        Self {
            backend,
            name: name.to_string(),
            return_type: return_type.to_string(),
            modifiers,
            body: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, child: Option<Box<dyn Node>>) -> Result<(), CodegenError> {
        let Some(child) = child else {
            return Ok(());
        };
        check_backend(self.backend, child.as_ref())?;
        check_kind(self.backend, NodeKind::Method, NodeKind::Print, child.as_ref())?;
        debug!(backend = %self.backend, method = %self.name, kind = %child.kind(), "appended statement");
        self.body.push(child);
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// `<indent><prefix><keywords…> <return type> <name>()<trailing> {`, the
    /// body one level deeper, then the closing brace at `level`.
    pub(crate) fn render(
        &self,
        level: usize,
        prefix: &str,
        keywords: &[&str],
        trailing: &str,
    ) -> String {
        let shift = indent(level);
        let mut out = format!("{shift}{prefix}");
        for keyword in keywords {
            out.push_str(keyword);
            out.push(' ');
        }
        out.push_str(&format!(
            "{} {}(){trailing} {{\n",
            self.return_type, self.name
        ));
        for stmt in &self.body {
            out.push_str(&stmt.render(level + 1));
        }
        out.push_str(&format!("{shift}}}\n"));
        out
    }
}

/// Leaf print statement: `<indent><call>( "<text>" );`.
pub(crate) fn render_print(level: usize, call: &str, text: &str) -> String {
    format!("{}{call}( \"{text}\" );\n", indent(level))
}
