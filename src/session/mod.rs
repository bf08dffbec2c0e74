pub(crate) mod consolidate;
pub(crate) mod harness;
pub(crate) mod run;
