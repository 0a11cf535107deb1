pub mod codec;
pub mod markdown;
pub mod pretty;
pub mod reader;
pub mod writer;
