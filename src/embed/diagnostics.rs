//! Diagnostics produced while embedding interop types.
//!
//! Interop contract violations (an interface without `ComImportAttribute`, two linked
//! assemblies contributing the same type name, a struct with methods, ...) never abort the
//! embedding process. They are collected into a [`DiagnosticBag`] supplied by the caller and
//! the compilation decides what to make of them.
//!
//! # Architecture
//!
//! Every public operation of [`crate::embed::EmbeddedTypesManager`] collects into a private
//! bag first and forwards the entries to the caller's bag after applying the severity policy
//! of [`crate::embed::EmbeddingConfig`]. Lazily computed values (attribute sets, the frozen
//! type list) forward only the diagnostics of the computation that got published, so a value
//! computed twice by racing threads reports exactly once.
//!
//! The [`DiagnosticBag`] container uses `boxcar::Vec` for thread-safe, lock-free append
//! operations, allowing diagnostics to be collected from parallel compilation threads without
//! synchronization overhead.
//!
//! # Examples
//!
//! ```rust
//! use nopia::embed::{Diagnostic, DiagnosticBag, DiagnosticCode, Location};
//!
//! let diagnostics = DiagnosticBag::new();
//! diagnostics.add(Diagnostic::new(
//!     DiagnosticCode::InteropTypeMissingAttribute,
//!     Location::source("Program.cs", 12, 9),
//!     vec!["Lib.IWidget".to_string(), "System.Runtime.InteropServices.GuidAttribute".to_string()],
//! ));
//!
//! assert!(diagnostics.has_errors());
//! assert_eq!(diagnostics.of_code(DiagnosticCode::InteropTypeMissingAttribute).len(), 1);
//! ```

use std::{
    fmt::{self, Write},
    sync::Arc,
};

use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::metadata::wellknown::WellKnownMember;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    /// Informational message
    Info,
    /// Problem that does not prevent emission
    Warning,
    /// Problem that makes the emitted module invalid or unusable
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// The diagnostics the embedding layer can produce.
///
/// Each code carries a stable numeric id, a default severity and a message template with
/// positional `{0}`, `{1}`, ... placeholders.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr, strum::Display,
)]
pub enum DiagnosticCode {
    /// A compiler required member (usually an attribute constructor) is missing
    MissingPredefinedMember,
    /// A linked type is nested inside another type
    NoPiaNestedType,
    /// A linked interface lacks `ComImportAttribute` or `GuidAttribute`
    InteropTypeMissingAttribute,
    /// A method of a linked struct or enum is referenced
    InteropStructContainsMethods,
    /// Two linked assemblies contribute a type with the same name
    InteropTypesWithSameNameAndGuid,
    /// A linked type clashes with a type declared in the compiled module
    LocalTypeNameClash,
    /// A referenced assembly references a linked assembly
    ReferencedAssemblyReferencesLinkedPia,
    /// The source interface of an event lacks the method backing the event
    MissingMethodOnSourceInterface,
    /// The source interface of an event cannot be resolved
    MissingSourceInterface,
    /// A linked type is generic
    GenericsUsedInNoPiaType,
    /// A linked interface has members with an implementation
    DefaultInterfaceImplementationInNoPiaType,
}

impl DiagnosticCode {
    /// The stable numeric id of the code
    #[must_use]
    pub fn id(&self) -> u32 {
        match self {
            DiagnosticCode::MissingPredefinedMember => 656,
            DiagnosticCode::NoPiaNestedType => 1754,
            DiagnosticCode::InteropTypeMissingAttribute => 1756,
            DiagnosticCode::InteropStructContainsMethods => 1757,
            DiagnosticCode::InteropTypesWithSameNameAndGuid => 1758,
            DiagnosticCode::LocalTypeNameClash => 1761,
            DiagnosticCode::ReferencedAssemblyReferencesLinkedPia => 1762,
            DiagnosticCode::MissingMethodOnSourceInterface => 1766,
            DiagnosticCode::MissingSourceInterface => 1767,
            DiagnosticCode::GenericsUsedInNoPiaType => 1768,
            DiagnosticCode::DefaultInterfaceImplementationInNoPiaType => 8711,
        }
    }

    /// Severity the code is reported with unless the configuration escalates it
    #[must_use]
    pub fn default_severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticCode::ReferencedAssemblyReferencesLinkedPia => DiagnosticSeverity::Warning,
            _ => DiagnosticSeverity::Error,
        }
    }

    /// Message template with positional placeholders
    #[must_use]
    pub fn message_template(&self) -> &'static str {
        match self {
            DiagnosticCode::MissingPredefinedMember => "Missing compiler required member '{0}.{1}'",
            DiagnosticCode::NoPiaNestedType => {
                "Type '{0}' cannot be embedded because it is a nested type. Consider setting the 'Embed Interop Types' property to false."
            }
            DiagnosticCode::InteropTypeMissingAttribute => {
                "Interop type '{0}' cannot be embedded because it is missing the required '{1}' attribute."
            }
            DiagnosticCode::InteropStructContainsMethods => {
                "Embedded interop struct '{0}' can contain only public instance fields."
            }
            DiagnosticCode::InteropTypesWithSameNameAndGuid => {
                "Cannot embed interop type '{0}' found in both assembly '{1}' and '{2}'. Consider setting the 'Embed Interop Types' property to false."
            }
            DiagnosticCode::LocalTypeNameClash => {
                "Embedding the interop type '{0}' from assembly '{1}' causes a name clash in the current assembly. Consider setting the 'Embed Interop Types' property to false."
            }
            DiagnosticCode::ReferencedAssemblyReferencesLinkedPia => {
                "A reference was created to embedded interop assembly '{0}' because of an indirect reference to that assembly created by assembly '{1}'. Consider changing the 'Embed Interop Types' property on either assembly."
            }
            DiagnosticCode::MissingMethodOnSourceInterface => {
                "Source interface '{0}' is missing method '{1}' which is required to embed event '{2}'."
            }
            DiagnosticCode::MissingSourceInterface => {
                "Interface '{0}' has an invalid source interface which is required to embed event '{1}'."
            }
            DiagnosticCode::GenericsUsedInNoPiaType => {
                "Type '{0}' cannot be embedded because it has a generic argument. Consider setting the 'Embed Interop Types' property to false."
            }
            DiagnosticCode::DefaultInterfaceImplementationInNoPiaType => {
                "Type '{0}' cannot be embedded because it has a non-abstract member. Consider setting the 'Embed Interop Types' property to false."
            }
        }
    }

    /// Render the message template with the given arguments.
    ///
    /// Placeholders without a matching argument are left untouched.
    #[must_use]
    pub fn format(&self, arguments: &[String]) -> String {
        let mut message = self.message_template().to_string();
        for (index, argument) in arguments.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), argument);
        }
        message
    }
}

/// Source position a diagnostic points at
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Location {
    /// No source position is available (metadata symbols, whole-compilation checks)
    #[default]
    None,
    /// A position in a source file
    Source {
        /// Path of the source file
        path: Arc<str>,
        /// 1-based line
        line: u32,
        /// 1-based column
        column: u32,
    },
}

impl Location {
    /// Create a source location
    #[must_use]
    pub fn source(path: &str, line: u32, column: u32) -> Self {
        Location::Source {
            path: Arc::from(path),
            line,
            column,
        }
    }

    /// Returns true if this location points into a source file
    #[must_use]
    pub fn is_in_source(&self) -> bool {
        matches!(self, Location::Source { .. })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::None => write!(f, "<no location>"),
            Location::Source { path, line, column } => write!(f, "{path}({line},{column})"),
        }
    }
}

/// A single diagnostic entry
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// What went wrong
    pub code: DiagnosticCode,
    /// Severity after policy has been applied
    pub severity: DiagnosticSeverity,
    /// Where it went wrong
    pub location: Location,
    /// Message arguments, substituted into the code's template
    pub arguments: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the code's default severity
    #[must_use]
    pub fn new(code: DiagnosticCode, location: Location, arguments: Vec<String>) -> Self {
        Diagnostic {
            code,
            severity: code.default_severity(),
            location,
            arguments,
        }
    }

    /// Diagnostic for an attribute constructor the target core library does not provide
    #[must_use]
    pub fn missing_predefined_member(constructor: WellKnownMember, location: Location) -> Self {
        Diagnostic::new(
            DiagnosticCode::MissingPredefinedMember,
            location,
            vec![constructor.attribute_type(), ".ctor".to_string()],
        )
    }

    /// Override the severity
    #[must_use]
    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// The rendered message
    #[must_use]
    pub fn message(&self) -> String {
        self.code.format(&self.arguments)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] NP{:04} {}: {}",
            self.severity,
            self.code.id(),
            self.location,
            self.message()
        )
    }
}

/// Thread-safe, append-only container for diagnostics
#[derive(Debug)]
pub struct DiagnosticBag {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for DiagnosticBag {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticBag {
    /// Create an empty bag
    #[must_use]
    pub fn new() -> Self {
        DiagnosticBag {
            entries: boxcar::Vec::new(),
        }
    }

    /// Append a diagnostic
    pub fn add(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Append a diagnostic built from a code with its default severity
    pub fn report(&self, code: DiagnosticCode, location: Location, arguments: Vec<String>) {
        self.add(Diagnostic::new(code, location, arguments));
    }

    /// Append copies of all entries of `other`, passing each through `policy`
    pub fn extend_from<F>(&self, other: &DiagnosticBag, policy: F)
    where
        F: Fn(Diagnostic) -> Diagnostic,
    {
        for entry in other.iter() {
            self.add(policy(entry.clone()));
        }
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.count()
    }

    /// Returns true if no diagnostic was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.count() == 0
    }

    /// Iterate over all entries, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns true if any entry has error severity
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.iter().any(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Number of error entries
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    /// Number of warning entries
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// All entries with the given code
    #[must_use]
    pub fn of_code(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.code == code).collect()
    }

    /// Human-readable summary of all entries
    #[must_use]
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        );
        for diagnostic in self.iter() {
            let _ = writeln!(output, "  {diagnostic}");
        }

        output
    }
}

impl fmt::Display for DiagnosticBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
