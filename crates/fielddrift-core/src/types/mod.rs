//! Shared types used across the workspace.

pub mod collections;
