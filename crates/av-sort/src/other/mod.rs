//! Demonstrative and non-classical sorts.
//!
//! | Module        | Algorithms                                                   |
//! |---------------|--------------------------------------------------------------|
//! | [`random`]    | bogo, bozo, less-bogo                                        |
//! | [`exchange`]  | gnome, optimized gnome, comb, odd-even transposition, cycle, pancake, circle |
//! | [`network`]   | bitonic (bottom-up, top-down), odd-even merge (iterative, recursive), pairwise |
//! | [`recursive`] | slow, stooge                                                 |
//! | [`gravity`]   | bead sort                                                    |
//! | [`library`]   | gapped insertion sort                                        |

pub mod exchange;
pub mod gravity;
pub mod library;
pub mod network;
pub mod random;
pub mod recursive;

pub use exchange::{circle, comb, cycle, gnome, gnome_optimized, odd_even_transposition, pancake};
pub use gravity::gravity;
pub use library::library;
pub use network::{
    bitonic_bottom_up, bitonic_top_down, odd_even_merge_iterative, odd_even_merge_recursive,
    pairwise,
};
pub use random::{bogo, bozo, less_bogo};
pub use recursive::{slow, stooge};
