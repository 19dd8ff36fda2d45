pub mod alignment;
pub mod confusion;
pub mod grounded;
pub mod pair_key;

// re-export for cleaner imports
pub use self::alignment::GroundedAlignment;
pub use self::confusion::ConfusionMatrix;
pub use self::grounded::GroundedSeq;
pub use self::pair_key::PairKey;
