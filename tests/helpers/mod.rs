//! Shared fixtures and assertions for index tests.

pub mod assertions;
