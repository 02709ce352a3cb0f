pub(crate) mod meta;
pub(crate) mod migrate;
pub(crate) mod subs;
pub(crate) mod sync;
