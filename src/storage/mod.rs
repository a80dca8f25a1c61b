mod memory;
mod sequence;

pub use memory::MemoryStore;
pub use sequence::Generator;
