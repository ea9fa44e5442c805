//! End-to-end scenarios driven through `SocialEngine`.
//!
//! Every test runs on in-memory storage with a manual clock, so persistence
//! and time are exercised for real without touching the filesystem.

mod conversation_tests;
