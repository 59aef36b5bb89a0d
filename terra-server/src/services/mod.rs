//! Outbound collaborators
//!
//! - [`email`]: transactional mail behind the [`Mailer`] trait
//! - [`storage`]: uploaded images behind the [`ObjectStore`] trait

pub mod email;
pub mod storage;

pub use email::{LogMailer, MailError, Mailer, SesMailer};
pub use storage::{LocalStore, ObjectStore, S3Store, StorageError, UploadedFile};
