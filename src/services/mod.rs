pub mod location;
pub mod messenger;
pub mod router;
