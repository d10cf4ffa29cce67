use classgen_spec::types::class::{ClassSpec, StatementSpec};
use classgen_spec::types::common::Backend;
use tracing::debug;

use crate::backends;
use crate::error::CodegenError;
use crate::traits::{BackendFactory, Node};

/// Turns class descriptions into node trees for one backend.
pub struct CodeGenerator {
    factory: Box<dyn BackendFactory>,
}

impl CodeGenerator {
    pub fn new(backend: Backend) -> Self {
        Self {
            factory: backends::create_factory(backend),
        }
    }

    pub fn backend(&self) -> Backend {
        self.factory.backend()
    }

    /// The factory this generator builds nodes with.
    pub fn factory(&self) -> &dyn BackendFactory {
        self.factory.as_ref()
    }

    /// Build the node tree for `spec`. Fails on the first access level the
    /// backend cannot express.
    pub fn build(&self, spec: &ClassSpec) -> Result<Box<dyn Node>, CodegenError> {
        let mut class = self
            .factory
            .create_class(&spec.name, spec.access, spec.modifier_flags())?;

        for method_spec in &spec.methods {
            let mut method = self.factory.create_method(
                &method_spec.name,
                &method_spec.return_type,
                method_spec.modifier_flags(),
            );
            for stmt in &method_spec.body {
                let node = match stmt {
                    StatementSpec::Print { text } => self.factory.create_print(text),
                };
                method.insert(Some(node), 0)?;
            }
            class.insert(Some(method), method_spec.access.ordinal())?;
        }

        debug!(
            backend = %self.backend(),
            class = %spec.name,
            members = class.child_count(),
            "built class tree"
        );
        Ok(class)
    }

    /// Build and render `spec` at the given nesting level.
    pub fn generate(&self, spec: &ClassSpec, level: usize) -> Result<String, CodegenError> {
        Ok(self.build(spec)?.render(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classgen_spec::types::class::MethodSpec;
    use classgen_spec::types::common::{AccessLevel, Modifier};
    use pretty_assertions::assert_eq;

    fn spec() -> ClassSpec {
        ClassSpec {
            target: None,
            name: "Greeter".to_string(),
            access: None,
            modifiers: Vec::new(),
            methods: vec![MethodSpec {
                name: "greet".to_string(),
                return_type: "void".to_string(),
                access: AccessLevel::Public,
                modifiers: vec![Modifier::Static],
                body: vec![StatementSpec::Print {
                    text: "hi".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn test_generate_cpp() {
        let out = CodeGenerator::new(Backend::Cpp).generate(&spec(), 0).unwrap();
        assert_eq!(
            out,
            "class Greeter {\n\
             public:\n\
             \tstatic void greet() {\n\
             \t\tprintf( \"hi\" );\n\
             \t}\n\n\
             };\n"
        );
    }

    #[test]
    fn test_build_counts_members() {
        let generator = CodeGenerator::new(Backend::Java);
        assert_eq!(generator.factory().backend(), Backend::Java);
        let tree = generator.build(&spec()).unwrap();
        assert_eq!(tree.child_count(), 1);
    }

    #[test]
    fn test_build_rejects_unsupported_member_access() {
        let mut spec = spec();
        spec.methods[0].access = AccessLevel::Internal;

        let err = CodeGenerator::new(Backend::Cpp).build(&spec).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidAccessLevel { ordinal: 3, .. }));

        // C# has internal members
        assert!(CodeGenerator::new(Backend::CSharp).build(&spec).is_ok());
    }

    #[test]
    fn test_build_rejects_unsupported_class_access() {
        let mut spec = spec();
        spec.access = Some(AccessLevel::Private);

        let err = CodeGenerator::new(Backend::Java).build(&spec).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::InvalidAccessLevel {
                backend: Backend::Java,
                ..
            }
        ));
    }
}
