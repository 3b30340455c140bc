use crate::{IconData, IconError, Result};

/// Application-supplied source of animation documents.
///
/// The hosting shell consults the loader when an `icon` or `src` attribute
/// names a document it does not already hold. Hosts that fetch over the
/// network should resolve the fetch first and hand the parsed document to the
/// loader synchronously; the shell never retries a failed load.
pub trait IconLoader {
    /// Resolve a document by logical icon name (`icon` attribute).
    fn load_icon(&self, name: &str) -> Result<IconData> {
        Err(IconError::IconLoadFailed {
            reason: format!("no loader configured for icon '{name}'"),
        })
    }

    /// Resolve a document by source location (`src` attribute).
    fn load_src(&self, src: &str) -> Result<IconData> {
        Err(IconError::IconLoadFailed {
            reason: format!("no loader configured for src '{src}'"),
        })
    }
}
