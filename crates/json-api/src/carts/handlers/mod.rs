//! Cart Handlers

pub(crate) mod add;
pub(crate) mod remove;
pub(crate) mod update;
pub(crate) mod view;
