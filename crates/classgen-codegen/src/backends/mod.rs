pub mod cpp;
pub mod csharp;
pub mod java;

use classgen_spec::types::common::Backend;

use crate::traits::BackendFactory;

/// Create the node factory for the given backend.
pub fn create_factory(backend: Backend) -> Box<dyn BackendFactory> {
    match backend {
        Backend::Cpp => Box::new(cpp::CppFactory),
        Backend::CSharp => Box::new(csharp::CSharpFactory),
        Backend::Java => Box::new(java::JavaFactory),
    }
}
