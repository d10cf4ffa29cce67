use classgen_spec::types::common::{AccessLevel, Backend, Modifiers};
use tracing::{debug, trace};

use crate::error::CodegenError;
use crate::indent::indent;
use crate::members::{render_print, AccessBuckets, MethodParts};
use crate::traits::{BackendFactory, Node, NodeKind};

/// Class access when none is requested. Not written out.
const DEFAULT_CLASS_ACCESS: AccessLevel = AccessLevel::Private;

/// C# node factory.
pub struct CSharpFactory;

impl BackendFactory for CSharpFactory {
    fn backend(&self) -> Backend {
        Backend::CSharp
    }

    fn create_class(
        &self,
        name: &str,
        access: Option<AccessLevel>,
        _modifiers: Modifiers,
    ) -> Result<Box<dyn Node>, CodegenError> {
        let access = access.unwrap_or(DEFAULT_CLASS_ACCESS);
        debug!(class = name, %access, "creating C# class");
        Ok(Box::new(CSharpClass::new(name, access.ordinal())?))
    }

    fn create_method(&self, name: &str, return_type: &str, modifiers: Modifiers) -> Box<dyn Node> {
        Box::new(CSharpMethod::new(name, return_type, modifiers))
    }

    fn create_print(&self, text: &str) -> Box<dyn Node> {
        Box::new(CSharpPrint::new(text))
    }
}

/// C# class. Members are grouped under an access header and also carry
/// their own access keyword.
#[derive(Debug)]
pub struct CSharpClass {
    name: String,
    access: AccessLevel,
    members: AccessBuckets,
}

impl CSharpClass {
    pub(crate) fn new(name: &str, access: u32) -> Result<Self, CodegenError> {
        let supported = Backend::CSharp.access_level_count();
        let access = AccessLevel::from_ordinal(access)
            .filter(|level| (level.ordinal() as usize) < supported)
            .ok_or(CodegenError::InvalidAccessLevel {
                backend: Backend::CSharp,
                ordinal: access,
                supported,
            })?;
        Ok(Self {
            name: name.to_string(),
            access,
            members: AccessBuckets::new(Backend::CSharp),
        })
    }
}

impl Node for CSharpClass {
    fn backend(&self) -> Backend {
        Backend::CSharp
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Class
    }

    fn render(&self, level: usize) -> String {
        trace!(class = %self.name, level, "rendering C# class");
        let shift = indent(level);
        let class_access = if self.access == DEFAULT_CLASS_ACCESS {
            String::new()
        } else {
            format!("{} ", self.access.keyword())
        };

        let mut out = format!("{shift}{class_access}class {} {{\n", self.name);
        for (access, members) in self.members.non_empty() {
            out.push_str(&format!("{shift}{}:\n", access.keyword()));
            let prefix = format!("{} ", access.keyword());
            for member in members {
                out.push_str(&member.render_prefixed(level + 1, &prefix));
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

/// C# method. `virtual` excludes `static` and `abstract`; `async` and
/// `unsafe` are independent.
#[derive(Debug)]
pub struct CSharpMethod {
    parts: MethodParts,
}

impl CSharpMethod {
    pub(crate) fn new(name: &str, return_type: &str, modifiers: Modifiers) -> Self {
        Self {
            parts: MethodParts::new(Backend::CSharp, name, return_type, modifiers),
        }
    }

    fn keywords(&self) -> Vec<&'static str> {
        let flags = self.parts.modifiers;
        let mut keywords = Vec::new();
        if flags.contains(Modifiers::VIRTUAL) {
            keywords.push("virtual");
        } else {
            if flags.contains(Modifiers::STATIC) {
                keywords.push("static");
            }
            if flags.contains(Modifiers::ABSTRACT) {
                keywords.push("abstract");
            }
        }
        if flags.contains(Modifiers::ASYNC) {
            keywords.push("async");
        }
        if flags.contains(Modifiers::UNSAFE) {
            keywords.push("unsafe");
        }
        keywords
    }
}

impl Node for CSharpMethod {
    fn backend(&self) -> Backend {
        Backend::CSharp
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Method
    }

    fn render(&self, level: usize) -> String {
        self.render_prefixed(level, "")
    }

    fn render_prefixed(&self, level: usize, prefix: &str) -> String {
        self.parts.render(level, prefix, &self.keywords(), "")
    }

    fn insert(&mut self, child: Option<Box<dyn Node>>, _placement: u32) -> Result<(), CodegenError> {
        self.parts.insert(child)
    }

    fn child_count(&self) -> usize {
        self.parts.len()
    }
}

/// `System.Console.WriteLine( "text" );`
#[derive(Debug)]
pub struct CSharpPrint {
    text: String,
}

impl CSharpPrint {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Node for CSharpPrint {
    fn backend(&self) -> Backend {
        Backend::CSharp
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Print
    }

    fn render(&self, level: usize) -> String {
        render_print(level, "System.Console.WriteLine", &self.text)
    }
}
