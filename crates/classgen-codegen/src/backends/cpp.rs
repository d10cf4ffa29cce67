use classgen_spec::types::common::{AccessLevel, Backend, Modifiers};
use tracing::{debug, trace};

use crate::error::CodegenError;
use crate::indent::indent;
use crate::members::{render_print, AccessBuckets, MethodParts};
use crate::traits::{BackendFactory, Node, NodeKind};

/// C++ node factory.
pub struct CppFactory;

impl BackendFactory for CppFactory {
    fn backend(&self) -> Backend {
        Backend::Cpp
    }

    // C++ classes carry no access keyword or class-level modifier.
    fn create_class(
        &self,
        name: &str,
        _access: Option<AccessLevel>,
        _modifiers: Modifiers,
    ) -> Result<Box<dyn Node>, CodegenError> {
        debug!(class = name, "creating C++ class");
        Ok(Box::new(CppClass::new(name)))
    }

    fn create_method(&self, name: &str, return_type: &str, modifiers: Modifiers) -> Box<dyn Node> {
        Box::new(CppMethod::new(name, return_type, modifiers))
    }

    fn create_print(&self, text: &str) -> Box<dyn Node> {
        Box::new(CppPrint::new(text))
    }
}

/// `class Name { public: ... };`
#[derive(Debug)]
pub struct CppClass {
    name: String,
    members: AccessBuckets,
}

impl CppClass {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: AccessBuckets::new(Backend::Cpp),
        }
    }
}

impl Node for CppClass {
    fn backend(&self) -> Backend {
        Backend::Cpp
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Class
    }

    fn render(&self, level: usize) -> String {
        trace!(class = %self.name, level, "rendering C++ class");
        let shift = indent(level);
        let mut out = format!("{shift}class {} {{\n", self.name);
        for (access, members) in self.members.non_empty() {
            out.push_str(&format!("{shift}{}:\n", access.keyword()));
            for member in members {
                out.push_str(&member.render(level + 1));
            }
            out.push('\n');
        }
        out.push_str(&format!("{shift}}};\n"));
        out
    }

    fn insert(&mut self, child: Option<Box<dyn Node>>, placement: u32) -> Result<(), CodegenError> {
        self.members.insert(child, placement)
    }

    fn child_count(&self) -> usize {
        self.members.len()
    }
}

/// C++ member function. `virtual` wins over `static`; `const` is a trailing
/// qualifier whenever set.
#[derive(Debug)]
pub struct CppMethod {
    parts: MethodParts,
}

impl CppMethod {
    pub(crate) fn new(name: &str, return_type: &str, modifiers: Modifiers) -> Self {
        Self {
            parts: MethodParts::new(Backend::Cpp, name, return_type, modifiers),
        }
    }

    fn keywords(&self) -> Vec<&'static str> {
        let flags = self.parts.modifiers;
        if flags.contains(Modifiers::VIRTUAL) {
            vec!["virtual"]
        } else if flags.contains(Modifiers::STATIC) {
            vec!["static"]
        } else {
            Vec::new()
        }
    }

    fn trailing(&self) -> &'static str {
        if self.parts.modifiers.contains(Modifiers::CONST) {
            " const"
        } else {
            ""
        }
    }
}

impl Node for CppMethod {
    fn backend(&self) -> Backend {
        Backend::Cpp
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Method
    }

    fn render(&self, level: usize) -> String {
        self.render_prefixed(level, "")
    }

    fn render_prefixed(&self, level: usize, prefix: &str) -> String {
        self.parts
            .render(level, prefix, &self.keywords(), self.trailing())
    }

    fn insert(&mut self, child: Option<Box<dyn Node>>, _placement: u32) -> Result<(), CodegenError> {
        self.parts.insert(child)
    }

    fn child_count(&self) -> usize {
        self.parts.len()
    }
}

/// `printf( "text" );`
#[derive(Debug)]
pub struct CppPrint {
    text: String,
}

impl CppPrint {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Node for CppPrint {
    fn backend(&self) -> Backend {
        Backend::Cpp
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Print
    }

    fn render(&self, level: usize) -> String {
        render_print(level, "printf", &self.text)
    }
}
