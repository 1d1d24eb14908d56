//! Object-store integration: presigned uploads for topic page images.
//!
//! [`signer`] wraps the external S3 signing protocol behind the
//! [`UploadSigner`] trait; [`coordinator`] drives the two-phase handshake
//! that turns a signed URL into a persisted image record.

pub mod coordinator;
pub mod signer;

pub use coordinator::ImageUploadCoordinator;
pub use signer::{S3Signer, SignError, SignedUpload, UploadSigner};
