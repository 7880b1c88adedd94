//! Embedding configuration
//!
//! This module provides the options a compilation passes to
//! [`crate::embed::EmbeddedTypesManager`]: diagnostic severity policy and the optional checks
//! and side effects of the embedding process.

use crate::embed::diagnostics::{Diagnostic, DiagnosticSeverity};

/// Configuration for the embedding of interop types
///
/// The defaults match what a compiler does for a regular `/link` reference: all interop checks
/// run, members named by `DefaultMemberAttribute` are embedded and indirect references to
/// linked assemblies are reported as warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct EmbeddingConfig {
    /// Report warnings as errors
    pub warnings_as_errors: bool,

    /// After freezing, check every contributing linked assembly for references to it from
    /// other referenced assemblies
    pub report_indirect_references: bool,

    /// Embed the fields, methods, properties and events named by a type's
    /// `DefaultMemberAttribute` together with the type
    pub embed_default_members: bool,

    /// Report linked interfaces that lack `ComImportAttribute` or `GuidAttribute`
    pub validate_interop_attributes: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            warnings_as_errors: false,
            report_indirect_references: true,
            embed_default_members: true,
            validate_interop_attributes: true,
        }
    }
}

impl EmbeddingConfig {
    /// Creates a strict configuration
    ///
    /// Same checks as the default, with every warning escalated to an error.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            warnings_as_errors: true,
            report_indirect_references: true,
            embed_default_members: true,
            validate_interop_attributes: true,
        }
    }

    /// Creates a permissive configuration
    ///
    /// Skips the interop attribute validation and the indirect reference check. Useful for
    /// tooling that inspects what would be embedded without producing a module.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            warnings_as_errors: false,
            report_indirect_references: false,
            embed_default_members: true,
            validate_interop_attributes: false,
        }
    }

    /// Apply the severity policy to a diagnostic
    #[must_use]
    pub fn apply(&self, diagnostic: Diagnostic) -> Diagnostic {
        if self.warnings_as_errors && diagnostic.severity == DiagnosticSeverity::Warning {
            diagnostic.with_severity(DiagnosticSeverity::Error)
        } else {
            diagnostic
        }
    }
}
