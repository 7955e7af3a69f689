//! Shared test infrastructure: a per-test PostgreSQL database inside a
//! reused container, plus a context bundling the real services.


pub(crate) use context::TestContext;
