pub mod audit;
pub mod book;
pub mod common;
pub mod game;
pub mod pagination;
pub mod reconcile;
pub mod report;
pub mod scan;

pub use audit::*;
pub use book::*;
pub use common::*;
pub use game::*;
pub use pagination::*;
pub use reconcile::*;
pub use report::*;
pub use scan::*;
