use classgen_spec::types::common::{AccessLevel, Backend, Modifiers};
use tracing::{debug, trace};

use crate::error::CodegenError;
use crate::indent::indent;
use crate::members::{render_print, AccessBuckets, MethodParts};
use crate::traits::{BackendFactory, Node, NodeKind};

/// Class access levels a Java class may be declared with: public, protected.
const CLASS_ACCESS_LEVELS: usize = 2;

/// Java node factory.
pub struct JavaFactory;

impl BackendFactory for JavaFactory {
    fn backend(&self) -> Backend {
        Backend::Java
    }

    fn create_class(
        &self,
        name: &str,
        access: Option<AccessLevel>,
        modifiers: Modifiers,
    ) -> Result<Box<dyn Node>, CodegenError> {
        let access = access.unwrap_or(AccessLevel::Public);
        debug!(class = name, %access, ?modifiers, "creating Java class");
        Ok(Box::new(JavaClass::new(name, access.ordinal(), modifiers)?))
    }

    fn create_method(&self, name: &str, return_type: &str, modifiers: Modifiers) -> Box<dyn Node> {
        Box::new(JavaMethod::new(name, return_type, modifiers))
    }

    fn create_print(&self, text: &str) -> Box<dyn Node> {
        Box::new(JavaPrint::new(text))
    }
}

/// Class-level modifier. Only one can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassModifier {
    Abstract,
    Final,
}

impl ClassModifier {
    /// `abstract` wins when both are requested.
    fn from_flags(flags: Modifiers) -> Option<Self> {
        if flags.contains(Modifiers::ABSTRACT) {
            Some(ClassModifier::Abstract)
        } else if flags.contains(Modifiers::FINAL) {
            Some(ClassModifier::Final)
        } else {
            None
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            ClassModifier::Abstract => "abstract",
            ClassModifier::Final => "final",
        }
    }
}

/// Java class. No access headers; every member carries its own keyword.
#[derive(Debug)]
pub struct JavaClass {
    name: String,
    access: AccessLevel,
    modifier: Option<ClassModifier>,
    members: AccessBuckets,
}

impl JavaClass {
    pub(crate) fn new(name: &str, access: u32, modifiers: Modifiers) -> Result<Self, CodegenError> {
        let access = AccessLevel::from_ordinal(access)
            .filter(|level| (level.ordinal() as usize) < CLASS_ACCESS_LEVELS)
            .ok_or(CodegenError::InvalidAccessLevel {
                backend: Backend::Java,
                ordinal: access,
                supported: CLASS_ACCESS_LEVELS,
            })?;
        Ok(Self {
            name: name.to_string(),
            access,
            modifier: ClassModifier::from_flags(modifiers),
            members: AccessBuckets::new(Backend::Java),
        })
    }
}

impl Node for JavaClass {
    fn backend(&self) -> Backend {
        Backend::Java
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Class
    }

    fn render(&self, level: usize) -> String {
        trace!(class = %self.name, level, "rendering Java class");
        let shift = indent(level);
        let modifier = self
            .modifier
            .map(|m| format!("{} ", m.keyword()))
            .unwrap_or_default();

        let mut out = format!(
            "{shift}{} {modifier}class {} {{\n",
            self.access.keyword(),
            self.name
        );
        for (access, members) in self.members.non_empty() {
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

/// Java method: `synchronized`, `static`, then `abstract` or else `final`.
#[derive(Debug)]
pub struct JavaMethod {
    parts: MethodParts,
}

impl JavaMethod {
    pub(crate) fn new(name: &str, return_type: &str, modifiers: Modifiers) -> Self {
        Self {
            parts: MethodParts::new(Backend::Java, name, return_type, modifiers),
        }
    }

    fn keywords(&self) -> Vec<&'static str> {
        let flags = self.parts.modifiers;
        let mut keywords = Vec::new();
        if flags.contains(Modifiers::SYNCHRONIZED) {
            keywords.push("synchronized");
        }
        if flags.contains(Modifiers::STATIC) {
            keywords.push("static");
        }
        if flags.contains(Modifiers::ABSTRACT) {
            keywords.push("abstract");
        } else if flags.contains(Modifiers::FINAL) {
            keywords.push("final");
        }
        keywords
    }
}

impl Node for JavaMethod {
    fn backend(&self) -> Backend {
        Backend::Java
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

/// `System.out.print( "text" );`
#[derive(Debug)]
pub struct JavaPrint {
    text: String,
}

impl JavaPrint {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Node for JavaPrint {
    fn backend(&self) -> Backend {
        Backend::Java
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Print
    }

    fn render(&self, level: usize) -> String {
        render_print(level, "System.out.print", &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn method(name: &str, modifiers: Modifiers) -> Box<dyn Node> {
        JavaFactory.create_method(name, "void", modifiers)
    }

    fn class(name: &str, modifiers: Modifiers) -> JavaClass {
        JavaClass::new(name, AccessLevel::Public.ordinal(), modifiers).unwrap()
    }

    #[test]
    fn test_empty_class() {
        assert_eq!(class("Empty", Modifiers::empty()).render(0), "public class Empty {\n};\n");
    }

    #[test]
    fn test_abstract_wins_over_final_on_class() {
        let c = class("Shape", Modifiers::ABSTRACT | Modifiers::FINAL);
        assert_eq!(c.render(0), "public abstract class Shape {\n};\n");

        let c = class("Point", Modifiers::FINAL | Modifiers::STATIC);
        assert_eq!(c.render(1), "\tpublic final class Point {\n\t};\n");
    }

    #[test]
    fn test_class_access_limited_to_public_and_protected() {
        let protected = JavaClass::new("P", AccessLevel::Protected.ordinal(), Modifiers::empty());
        assert!(protected.is_ok());

        let err = JavaClass::new("X", AccessLevel::Private.ordinal(), Modifiers::empty()).unwrap_err();
        assert_eq!(
            err,
            CodegenError::InvalidAccessLevel {
                backend: Backend::Java,
                ordinal: 2,
                supported: 2,
            }
        );
    }

    #[test]
    fn test_members_carry_access_without_headers() {
        let mut c = class("MyClass", Modifiers::empty());
        c.insert(Some(method("b", Modifiers::empty())), AccessLevel::Private.into())
            .unwrap();
        c.insert(Some(method("a", Modifiers::STATIC)), AccessLevel::Public.into())
            .unwrap();

        assert_eq!(
            c.render(0),
            "public class MyClass {\n\
             \tpublic static void a() {\n\t}\n\n\
             \tprivate void b() {\n\t}\n\n\
             };\n"
        );
    }

    #[test]
    fn test_method_modifier_order() {
        let m = method(
            "f",
            Modifiers::FINAL | Modifiers::STATIC | Modifiers::SYNCHRONIZED,
        );
        assert_eq!(m.render(0), "synchronized static final void f() {\n}\n");

        let m = method("g", Modifiers::ABSTRACT | Modifiers::FINAL);
        assert_eq!(m.render(0), "abstract void g() {\n}\n");
    }

    #[test]
    fn test_internal_member_access_rejected() {
        let mut c = class("A", Modifiers::empty());
        let err = c
            .insert(Some(method("f", Modifiers::empty())), AccessLevel::Internal.into())
            .unwrap_err();
        assert!(matches!(err, CodegenError::InvalidAccessLevel { ordinal: 3, .. }));
        assert_eq!(c.child_count(), 0);
    }

    #[test]
    fn test_print_statement() {
        assert_eq!(
            JavaPrint::new("x").render(1),
            "\tSystem.out.print( \"x\" );\n"
        );
    }
}
