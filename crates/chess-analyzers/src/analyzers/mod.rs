pub mod fork;
pub mod pin;
pub mod sacrifice;
pub mod trapped_piece;

pub use fork::ForkDetector;
pub use pin::PinDetector;
pub use sacrifice::SacrificeDetector;
pub use trapped_piece::TrappedPieceDetector;
