pub mod protocol;
pub mod router;
