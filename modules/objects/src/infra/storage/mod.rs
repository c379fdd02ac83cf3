pub mod memory;
mod record;
