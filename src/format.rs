pub(crate) mod chunk;
pub(crate) mod chunks;
pub(crate) mod decoder;
pub(crate) mod header;
pub(crate) mod reader;
pub(crate) mod records;
