//! DynamoDB record sources for dynamo-frames
//!
//! This crate retrieves record batches for the tabular pipeline:
//!
//! - **`RecordSource`**: the retrieval seam; one `scan` per table name
//! - **DynamoDB** (`dynamodb`): paginated `Scan` over a table, converting SDK
//!   attribute values into [`dynamo_frames_tabular::AttributeValue`]
//! - **Memory** (`memory`): fixed batches keyed by table name, for tests
//!
//! ## Usage
//!
//! ```ignore
//! use dynamo_frames_aws::{load_sdk_config, DynamoDbConfig, DynamoDbSource, RecordSource};
//!
//! let sdk_config = load_sdk_config(None, Some("us-east-1")).await;
//! let source = DynamoDbSource::new(&sdk_config, DynamoDbConfig::default())?;
//! let batch = source.scan("my-table").await?;
//! let table = dynamo_frames_tabular::extract_table(&batch);
//! ```

pub mod dynamodb;
pub mod error;
pub mod memory;
pub mod source;

pub use dynamodb::{load_sdk_config, DynamoDbConfig, DynamoDbSource, StaticCredentials};
pub use error::{AwsError, Result};
pub use memory::MemorySource;
pub use source::RecordSource;
