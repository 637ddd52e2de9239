pub mod console;
pub mod etag;
pub mod json;
