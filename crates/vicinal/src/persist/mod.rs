//! Serialization of grown indexes and estimator configuration.
//!
//! A [`Persistable`] type serializes to an opaque versioned blob and
//! restores to an equivalent state without retraining: a grown ball tree
//! comes back grown. The payload format is a private detail of this module;
//! callers treat the blob as bytes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::classifiers::RadiusNeighbors;
use crate::kernels::Distance;
use crate::regressors::RadiusNeighborsRegressor;
use crate::tree::{BallTree, Spatial};

/// Version stamped into every blob; bumped on breaking payload changes.
pub const SCHEMA_VERSION: u32 = 1;

const LIBRARY: &str = "vicinal";

/// Errors raised while persisting or restoring an estimator.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// A blob produced by something other than this library.
    #[error("blob was not produced by this library")]
    WrongLibrary,

    /// A blob from an incompatible schema version.
    #[error("unsupported schema version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// A malformed payload.
    #[error("codec: {0}")]
    Codec(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    library: &'a str,
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Header {
    library: String,
    version: u32,
}

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Restored<T> {
    payload: T,
}

/// A type that round-trips through an opaque blob.
pub trait Persistable: Serialize + DeserializeOwned {
    /// Serialize to a versioned blob.
    fn to_blob(&self) -> Result<Vec<u8>, PersistError> {
        let envelope = Envelope {
            library: LIBRARY,
            version: SCHEMA_VERSION,
            payload: self,
        };

        Ok(serde_json::to_vec(&envelope)?)
    }

    /// Restore from a blob produced by [`Persistable::to_blob`].
    ///
    /// # Errors
    ///
    /// Fails on blobs from other libraries, incompatible schema versions, or
    /// malformed payloads.
    fn from_blob(bytes: &[u8]) -> Result<Self, PersistError> {
        let header: Header = serde_json::from_slice(bytes)?;

        if header.library != LIBRARY {
            return Err(PersistError::WrongLibrary);
        }

        if header.version != SCHEMA_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: header.version,
                expected: SCHEMA_VERSION,
            });
        }

        let restored: Restored<Self> = serde_json::from_slice(bytes)?;

        Ok(restored.payload)
    }
}

impl<K> Persistable for BallTree<K> where K: Distance + Serialize + DeserializeOwned {}

impl<T> Persistable for RadiusNeighbors<T> where T: Spatial + Serialize + DeserializeOwned {}

impl<T> Persistable for RadiusNeighborsRegressor<T> where T: Spatial + Serialize + DeserializeOwned {}
