pub mod collect;
pub mod submissions;
