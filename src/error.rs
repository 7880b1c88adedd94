use thiserror::Error;

macro_rules! unreachable_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Unreachable {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Unreachable {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Interop problems found in user code (a COM interface without `ComImportAttribute`, two
/// linked assemblies contributing the same type name, ...) are never reported through this
/// type. They are accumulated as [`crate::embed::Diagnostic`]s in a caller supplied
/// [`crate::embed::DiagnosticBag`] and the compilation carries on. `Error` only covers states
/// that indicate a defect in the calling compiler.
///
/// # Error Categories
///
/// ## Lifecycle Errors
/// - [`Error::NotFrozen`] - Member lists were requested before the type set was frozen
/// - [`Error::ManagerReleased`] - An embedded definition outlived its manager
///
/// ## Invariant Errors
/// - [`Error::Unreachable`] - A structurally impossible request was made
///
/// # Examples
///
/// ```rust,ignore
/// use nopia::Error;
///
/// match embedded_type.methods() {
///     Ok(methods) => println!("{} method slots", methods.len()),
///     Err(Error::NotFrozen) => eprintln!("call get_types() before emitting members"),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The embedded type set has not been frozen yet.
    ///
    /// Field, method, property and event lists of an embedded type depend on which
    /// members every other caller decided to embed. They can only be materialized after
    /// [`crate::embed::EmbeddedTypesManager::get_types`] has published the final type set.
    #[error("The embedded type set has not been frozen yet")]
    NotFrozen,

    /// The manager owning an embedded definition has been dropped.
    ///
    /// Embedded definitions keep a weak back-reference to their manager. Accessing a
    /// definition after the manager is gone means the caller kept definitions alive past
    /// the end of the emission phase.
    #[error("The embedded types manager has been released")]
    ManagerReleased,

    /// A request that cannot happen with correct call sites.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the impossible request
    /// * `file` - Source file where the request was detected
    /// * `line` - Source line where the request was detected
    #[error("Unreachable - {file}:{line}: {message}")]
    Unreachable {
        /// The message to be printed for the Unreachable error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
