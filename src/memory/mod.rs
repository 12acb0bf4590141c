pub mod errors;
pub mod page_table;
pub mod physical;

pub use errors::{MemoryError, MemoryResult};
pub use page_table::{AddressSpace, Page, pages_for};
pub use physical::{Frame, Occupant, PhysicalMemory};
