use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use classgen_codegen::{BackendFactory, CodeGenerator, CodegenError};
use classgen_spec::schema_def::{generate_class_schema, validate_class_value};
use classgen_spec::types::common::{AccessLevel, Backend, Modifiers};
use classgen_spec::types::error::{ErrorEntry, E_INVALID_ACCESS, E_MISSING_TARGET};
use classgen_spec::ClassSpec;

#[derive(Parser)]
#[command(name = "classgen", about = "classgen – render class skeletons for C++, C# and Java")]
#[command(version, propagate_version = true)]
struct Cli {
    /// Enable debug logging (overrides CLASSGEN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the built-in example class for every backend
    Demo {
        /// Only render for this backend (cpp, csharp, java)
        #[arg(short, long)]
        backend: Option<Backend>,
    },
    /// Render a class description file
    Render {
        /// Path to a *.class.json file
        file: PathBuf,
        /// Backend to render for (defaults to the file's "target")
        #[arg(short, long)]
        backend: Option<Backend>,
        /// Starting nesting level
        #[arg(short, long, default_value_t = 0)]
        level: usize,
        /// Write the code to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a class description file
    Check {
        /// Path to a *.class.json file
        file: PathBuf,
    },
    /// Print the JSON Schema of the class description format
    Schema,
    /// List backends with their access levels and modifiers
    Backends,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Demo { backend } => cmd_demo(backend),
        Command::Render {
            file,
            backend,
            level,
            output,
        } => cmd_render(&file, backend, level, output.as_deref()),
        Command::Check { file } => cmd_check(&file),
        Command::Schema => cmd_schema(),
        Command::Backends => cmd_backends(),
    };

    match result {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

/// Log to stderr so generated code on stdout stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CLASSGEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build the example class through `factory` and render it.
fn demo_program(factory: &dyn BackendFactory) -> Result<String, CodegenError> {
    let mut class = factory.create_class("MyClass", None, Modifiers::empty())?;
    class.insert(
        Some(factory.create_method("testFunc1", "void", Modifiers::empty())),
        AccessLevel::Public.into(),
    )?;
    class.insert(
        Some(factory.create_method("testFunc2", "void", Modifiers::STATIC)),
        AccessLevel::Private.into(),
    )?;
    class.insert(
        Some(factory.create_method(
            "testFunc3",
            "void",
            Modifiers::VIRTUAL | Modifiers::CONST,
        )),
        AccessLevel::Public.into(),
    )?;

    let mut method = factory.create_method("testFunc4", "void", Modifiers::STATIC);
    method.insert(Some(factory.create_print(r"Hello, world!\n")), 0)?;
    class.insert(Some(method), AccessLevel::Protected.into())?;

    Ok(class.render(0))
}

fn cmd_demo(backend: Option<Backend>) -> Result<bool> {
    let backends = match backend {
        Some(b) => vec![b],
        None => Backend::ALL.to_vec(),
    };

    for backend in backends {
        let generator = CodeGenerator::new(backend);
        let code = demo_program(generator.factory())
            .with_context(|| format!("Failed to build the {backend} demo class"))?;
        println!("{}", format!("{backend} code:").bold());
        println!();
        println!("{code}");
    }
    Ok(true)
}

/// Pick the backend: explicit flag first, then the file's `target`.
fn resolve_backend(spec: &ClassSpec, flag: Option<Backend>, file: &Path) -> Result<Backend> {
    match flag.or(spec.target) {
        Some(backend) => Ok(backend),
        None => {
            let entry = ErrorEntry::error(
                E_MISSING_TARGET,
                "no backend selected",
                &file.to_string_lossy(),
                "$.target",
            )
            .with_suggestion("Add \"target\" to the file or pass --backend");
            anyhow::bail!("{entry}")
        }
    }
}

fn render_file(file: &Path, backend: Option<Backend>, level: usize) -> Result<String> {
    let spec = classgen_spec::load_class(file)
        .with_context(|| format!("Failed to load '{}'", file.display()))?;
    let backend = resolve_backend(&spec, backend, file)?;
    debug!(%backend, file = %file.display(), level, "rendering class");

    CodeGenerator::new(backend)
        .generate(&spec, level)
        .with_context(|| format!("Failed to generate {backend} code for '{}'", spec.name))
}

fn cmd_render(
    file: &Path,
    backend: Option<Backend>,
    level: usize,
    output: Option<&Path>,
) -> Result<bool> {
    let code = render_file(file, backend, level)?;

    match output {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, &code)
                .with_context(|| format!("Failed to write to '{}'", out.display()))?;
            println!("{} Wrote {}", "✓".green().bold(), out.display());
        }
        None => print!("{code}"),
    }
    Ok(true)
}

/// Schema, parse and tree-building diagnostics for one file.
///
/// A document that breaks the schema also fails to deserialize; only the
/// schema entries are reported then, since they point at the field.
fn check_file(file: &Path) -> Result<(Option<ClassSpec>, Vec<ErrorEntry>)> {
    let file_name = file.to_string_lossy().into_owned();
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read '{}'", file.display()))?;

    let mut entries = Vec::new();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&content) {
        entries.extend(validate_class_value(&value, &file_name));
    }

    let spec = match classgen_spec::parse_class(&content, &file_name) {
        Ok(spec) => spec,
        Err(entry) => {
            if entries.is_empty() {
                entries.push(entry);
            }
            return Ok((None, entries));
        }
    };

    let backends = match spec.target {
        Some(b) => vec![b],
        None => Backend::ALL.to_vec(),
    };
    for backend in backends {
        if let Err(e) = CodeGenerator::new(backend).build(&spec) {
            entries.push(
                ErrorEntry::error(E_INVALID_ACCESS, e.to_string(), &file_name, "$")
                    .with_suggestion(format!(
                        "{backend} access levels: {}",
                        access_level_names(backend)
                    )),
            );
        }
    }
    Ok((Some(spec), entries))
}

fn cmd_check(file: &Path) -> Result<bool> {
    println!("{} {}", "Checking".bold(), file.display());
    let (spec, entries) = check_file(file)?;

    for entry in &entries {
        println!(
            "  {} [{}] {} ({}:{})",
            "error".red().bold(),
            entry.code.dimmed(),
            entry.message,
            entry.file.dimmed(),
            entry.path.dimmed(),
        );
        if let Some(suggestion) = &entry.suggestion {
            println!("    {} {}", "hint:".cyan(), suggestion);
        }
    }

    println!();
    match spec {
        Some(spec) if entries.is_empty() => {
            println!(
                "{} Class '{}' is valid ({} method(s))",
                "✓".green().bold(),
                spec.name,
                spec.methods.len()
            );
            Ok(true)
        }
        _ => {
            println!("{} {} error(s)", "✗".red().bold(), entries.len());
            Ok(false)
        }
    }
}

fn cmd_schema() -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(&generate_class_schema())?);
    Ok(true)
}

fn access_level_names(backend: Backend) -> String {
    backend
        .access_levels()
        .iter()
        .map(|l| l.keyword())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_backends() -> Result<bool> {
    for backend in Backend::ALL {
        println!("{} ({})", backend.to_string().bold(), backend.id().dimmed());
        println!("  Access:    {}", access_level_names(backend));
        let modifiers: Vec<String> = backend
            .recognized_modifiers()
            .iter_names()
            .map(|(name, _)| name.to_lowercase())
            .collect();
        println!("  Modifiers: {}", modifiers.join(", "));
    }
    Ok(true)
}
