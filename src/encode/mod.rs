pub(crate) mod pgm;
pub(crate) mod png;
