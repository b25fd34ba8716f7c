//! Shared test utilities for idea-store unit tests.
