//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Galangan is the parent of both Setor and Lunas.

pub mod galangan;
pub mod lunas;
pub mod setor;

// Re-export specific types to avoid conflicts
pub use galangan::{Column as GalanganColumn, Entity as Galangan, Model as GalanganModel};
pub use lunas::{Column as LunasColumn, Entity as Lunas, Model as LunasModel};
pub use setor::{Column as SetorColumn, Entity as Setor, Model as SetorModel};
