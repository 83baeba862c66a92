//! Test support: fixtures and in-memory platform fakes.


pub(crate) use platform::InMemoryPlatform;
