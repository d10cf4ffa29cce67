use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Target languages a class can be rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// C++: three access levels grouped under `public:`-style headers
    Cpp,
    /// C#: six access levels, explicit class access keyword
    CSharp,
    /// Java: three access levels plus a class-level modifier
    Java,
}

impl Backend {
    /// Every supported backend, in demo order.
    pub const ALL: [Backend; 3] = [Backend::Cpp, Backend::CSharp, Backend::Java];

    /// Number of access levels this backend understands. Valid ordinals are
    /// `0..access_level_count()`.
    pub fn access_level_count(self) -> usize {
        match self {
            Backend::Cpp => 3,
            Backend::CSharp => 6,
            Backend::Java => 3,
        }
    }

    /// Access levels this backend understands, in rendering order.
    pub fn access_levels(self) -> &'static [AccessLevel] {
        static LEVELS: [AccessLevel; 6] = AccessLevel::ALL;
        &LEVELS[..self.access_level_count()]
    }

    /// Method modifiers that have an effect on this backend's output.
    pub fn recognized_modifiers(self) -> Modifiers {
        match self {
            Backend::Cpp => Modifiers::STATIC | Modifiers::CONST | Modifiers::VIRTUAL,
            Backend::CSharp => {
                Modifiers::STATIC
                    | Modifiers::VIRTUAL
                    | Modifiers::ABSTRACT
                    | Modifiers::ASYNC
                    | Modifiers::UNSAFE
            }
            Backend::Java => {
                Modifiers::STATIC
                    | Modifiers::ABSTRACT
                    | Modifiers::FINAL
                    | Modifiers::SYNCHRONIZED
            }
        }
    }

    /// Short identifier used in description files and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Backend::Cpp => "cpp",
            Backend::CSharp => "csharp",
            Backend::Java => "java",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Cpp => "C++",
            Backend::CSharp => "C#",
            Backend::Java => "Java",
        };
        f.write_str(name)
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Ok(Backend::Cpp),
            "csharp" | "c#" | "cs" => Ok(Backend::CSharp),
            "java" => Ok(Backend::Java),
            other => Err(format!(
                "unknown backend '{other}', expected one of: cpp, csharp, java"
            )),
        }
    }
}

/// Member and class visibility. The discriminant is the ordinal used for
/// insertion; each backend accepts a prefix of this list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AccessLevel {
    Public = 0,
    Protected = 1,
    Private = 2,
    Internal = 3,
    ProtectedInternal = 4,
    PrivateProtected = 5,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 6] = [
        AccessLevel::Public,
        AccessLevel::Protected,
        AccessLevel::Private,
        AccessLevel::Internal,
        AccessLevel::ProtectedInternal,
        AccessLevel::PrivateProtected,
    ];

    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Source keyword(s) for this level.
    pub fn keyword(self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Protected => "protected",
            AccessLevel::Private => "private",
            AccessLevel::Internal => "internal",
            AccessLevel::ProtectedInternal => "protected internal",
            AccessLevel::PrivateProtected => "private protected",
        }
    }
}

impl From<AccessLevel> for u32 {
    fn from(level: AccessLevel) -> Self {
        level.ordinal()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

bitflags! {
    /// Method (and class) modifier flags.
    ///
    /// Any bit pattern is accepted; each backend decides at render time
    /// which flags it recognizes and which one wins when they conflict.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Modifiers: u32 {
        const STATIC = 1 << 0;
        const CONST = 1 << 1;
        const VIRTUAL = 1 << 2;
        const ABSTRACT = 1 << 3;
        const ASYNC = 1 << 4;
        const UNSAFE = 1 << 5;
        const FINAL = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
    }
}

/// A single modifier as written in a description file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Static,
    Const,
    Virtual,
    Abstract,
    Async,
    Unsafe,
    Final,
    Synchronized,
}

impl Modifier {
    pub const ALL: [Modifier; 8] = [
        Modifier::Static,
        Modifier::Const,
        Modifier::Virtual,
        Modifier::Abstract,
        Modifier::Async,
        Modifier::Unsafe,
        Modifier::Final,
        Modifier::Synchronized,
    ];

    pub fn flag(self) -> Modifiers {
        match self {
            Modifier::Static => Modifiers::STATIC,
            Modifier::Const => Modifiers::CONST,
            Modifier::Virtual => Modifiers::VIRTUAL,
            Modifier::Abstract => Modifiers::ABSTRACT,
            Modifier::Async => Modifiers::ASYNC,
            Modifier::Unsafe => Modifiers::UNSAFE,
            Modifier::Final => Modifiers::FINAL,
            Modifier::Synchronized => Modifiers::SYNCHRONIZED,
        }
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Modifiers::empty(), |acc, m| acc | m.flag())
    }
}
