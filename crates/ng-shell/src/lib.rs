//! # ng-shell
//!
//! Assembly layer: loads configuration, initializes tracing and wires the
//! launch use cases to their infrastructure adapters. Collaborators backed
//! by remote services are supplied by the embedding application.

pub mod adapters;
pub mod bootstrap;

pub use bootstrap::{load_config, start_launch, LaunchCollaborators, LaunchHandle};
