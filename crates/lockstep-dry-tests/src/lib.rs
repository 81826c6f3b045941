// SPDX-License-Identifier: Apache-2.0
//! Shared test doubles and fixtures for lockstep crates.
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`poses`] - Pose builders with exact fixed-point inputs
//! - [`scenes`] - Body lists (box stacks, sphere rows) for determinism tests
//! - [`runner`] - Property-test runners with a pinned ChaCha seed
#![forbid(unsafe_code)]

pub mod config;
pub mod poses;
pub mod runner;
pub mod scenes;

pub use config::InMemoryConfigStore;
pub use poses::{fx, PoseBuilder};
pub use runner::{pinned_runner, pose_strategy, SEED_BYTES};
pub use scenes::{box_stack, sphere_row, TestBody};
