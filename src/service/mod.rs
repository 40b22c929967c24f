//! InventoryService: the write and lookup flows shared by every handler.

mod inventory;
mod validation;
pub use inventory::InventoryService;
pub use validation::RequestValidator;
