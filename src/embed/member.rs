//! State shared by every embedded member kind.

use std::{fmt, sync::Arc};

use crate::{
    embed::{
        diagnostics::DiagnosticBag, lazy::PublishOnce, manager::EmbeddedTypesManager,
        types::EmbeddedType, EmbeddingBinding,
    },
    metadata::customattributes::SynthesizedAttribute,
    Result,
};

/// An underlying member symbol together with the embedded type it belongs to and its lazily
/// computed attribute set.
pub struct EmbeddedMember<B: EmbeddingBinding, S> {
    symbol: Arc<S>,
    containing_type: Arc<EmbeddedType<B>>,
    attributes: PublishOnce<Vec<SynthesizedAttribute>>,
}

impl<B: EmbeddingBinding, S> EmbeddedMember<B, S> {
    pub(crate) fn new(symbol: Arc<S>, containing_type: Arc<EmbeddedType<B>>) -> Self {
        EmbeddedMember {
            symbol,
            containing_type,
            attributes: PublishOnce::new(),
        }
    }

    /// The underlying symbol
    pub fn symbol(&self) -> &Arc<S> {
        &self.symbol
    }

    /// The embedded type declaring this member
    pub fn containing_type(&self) -> &Arc<EmbeddedType<B>> {
        &self.containing_type
    }

    /// The manager owning the containing type
    ///
    /// # Errors
    /// Returns [`crate::Error::ManagerReleased`] if the manager has been dropped.
    pub fn manager(&self) -> Result<Arc<EmbeddedTypesManager<B>>> {
        self.containing_type.manager()
    }

    /// Return the attribute set, computing it on first access.
    ///
    /// Only the diagnostics of the published computation reach `diagnostics`.
    pub(crate) fn attributes_with<F>(
        &self,
        diagnostics: &DiagnosticBag,
        compute: F,
    ) -> Result<&[SynthesizedAttribute]>
    where
        F: FnOnce(&EmbeddedTypesManager<B>, &DiagnosticBag) -> Vec<SynthesizedAttribute>,
    {
        if let Some(attributes) = self.attributes.get() {
            return Ok(attributes);
        }

        let manager = self.manager()?;
        let (attributes, published) = self
            .attributes
            .get_or_publish(|local| compute(&manager, local));
        if let Some(local) = published {
            manager.forward(&local, diagnostics);
        }
        Ok(attributes)
    }
}

impl<B: EmbeddingBinding, S> fmt::Debug for EmbeddedMember<B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedMember")
            .field("containing_type", &self.containing_type.qualified_name())
            .field("attributes_computed", &self.attributes.is_published())
            .finish()
    }
}
