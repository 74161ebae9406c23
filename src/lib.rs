// Library exports for maptrack
pub mod classify;
pub mod extract;
pub mod layout;
pub mod pipeline;
pub mod read_name;
pub mod record;
pub mod table;
