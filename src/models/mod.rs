pub mod location;
pub mod pagination;
pub mod response;
