pub mod admin;
pub mod cancel_order;
pub mod fill_order;
pub mod initialize_exchange;
pub mod place_buy_order;
pub mod place_sell_order;
pub mod settle;
pub mod settlement;
pub mod views;
pub mod withdraw_payments;

// Each module's `handler` is reached through its module path
#[allow(ambiguous_glob_reexports)]
pub use admin::*;
#[allow(ambiguous_glob_reexports)]
pub use cancel_order::*;
#[allow(ambiguous_glob_reexports)]
pub use fill_order::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_exchange::*;
#[allow(ambiguous_glob_reexports)]
pub use place_buy_order::*;
#[allow(ambiguous_glob_reexports)]
pub use place_sell_order::*;
#[allow(ambiguous_glob_reexports)]
pub use settle::*;
#[allow(ambiguous_glob_reexports)]
pub use settlement::*;
#[allow(ambiguous_glob_reexports)]
pub use views::*;
#[allow(ambiguous_glob_reexports)]
pub use withdraw_payments::*;
