pub(crate) mod decision;
pub(crate) mod metrics;
