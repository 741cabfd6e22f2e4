//! 附件存储
//!
//! - [`AttachmentStore`] - 本地磁盘存储 (`{work_dir}/uploads/{receipts,expenses}`)
//! - [`UrlSigner`] - 附件下载签名 URL (HMAC-SHA256)

pub mod attachments;
pub mod signed_url;

pub use attachments::{AttachmentKind, AttachmentStore, StorageError, sanitize_file_name};
pub use signed_url::{SignatureError, UrlSigner};
