//! # Service Bus Management Library
//!
//! Typed client for the Azure Service Bus management plane (Azure Resource
//! Manager, provider `Microsoft.ServiceBus`, api-version `2021-11-01`).
//! Namespaces, entities, authorization rules, Geo-DR aliases, migrations and
//! private networking are created, read, updated and deleted through
//! operation groups hanging off a single [`ServiceBusManagementClient`].
//!
//! ## Modules
//!
//! - [`auth`] - Credential providers, token cache and SAS token signing
//! - [`client`] - The client façade and its options
//! - [`config`] - File and environment configuration
//! - [`operations`] - One operation group per resource family
//! - [`models`] - Wire models for every resource
//! - [`pipeline`] - Request execution: auth headers, retry, rate limiting
//! - [`poller`] - Long-running operation polling
//! - [`pager`] - `nextLink` paging
//! - [`resource_id`] - ARM resource id parsing
//! - [`error`] - The crate error type
//! - [`common`] - Transport errors and rate limiting
//! - [`utils`] - Environment helpers
//!
//! ## Example
//!
//! ```no_run
//! use sbmgmt::{ManagementConfig, ServiceBusManagementClient};
//! use sbmgmt::models::{SbQueue, SbQueueProperties};
//!
//! # async fn run() -> sbmgmt::ManagementResult<()> {
//! let config = ManagementConfig::load()?;
//! let client = ServiceBusManagementClient::from_config(&config)?;
//!
//! let queue = SbQueue::with_properties(SbQueueProperties {
//!     max_delivery_count: Some(5),
//!     ..Default::default()
//! });
//! client.queues().create_or_update("rg", "ns", "orders", &queue).await?;
//!
//! for queue in client.queues().list_by_namespace("rg", "ns", None, None)?.collect_all().await? {
//!     println!("{:?}", queue.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod models;
pub mod operations;
pub mod pager;
pub mod pipeline;
pub mod poller;
pub mod resource_id;
pub mod utils;

pub use client::{API_VERSION, ClientOptions, DEFAULT_ENDPOINT, ServiceBusManagementClient};
pub use common::HttpError;
pub use config::ManagementConfig;
pub use error::{ManagementError, ManagementResult};
pub use pager::Pager;
pub use pipeline::RetryOptions;
pub use poller::{OperationStatus, Poller};
pub use resource_id::ResourceId;
